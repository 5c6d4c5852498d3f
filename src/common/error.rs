use thiserror::Error;

// Encoding failure
//------------------------------------------------------------------------------

/// Reasons a payload cannot be turned into a QR matrix.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum EncodingFailure {
    #[error("Empty data")]
    EmptyData,
    #[error("Data too long")]
    DataTooLong,
    #[error("Unsupported payload: {0}")]
    Unsupported(String),
    #[error("Matrix rows have unequal lengths")]
    RaggedMatrix,
}

impl From<qrcode::types::QrError> for EncodingFailure {
    fn from(err: qrcode::types::QrError) -> Self {
        match err {
            qrcode::types::QrError::DataTooLong => Self::DataTooLong,
            other => Self::Unsupported(other.to_string()),
        }
    }
}

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum Error {
    #[error("QR encoding failed: {0}")]
    Encoding(#[from] EncodingFailure),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Storage error for key '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Index {index} out of range for {len} saved codes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid protocol: '{0}'")]
    InvalidProtocol(String),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Storage { key: key.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod error_tests {
    use super::{EncodingFailure, Error};

    #[test]
    fn test_qrcode_error_mapping() {
        let err: EncodingFailure = qrcode::types::QrError::DataTooLong.into();
        assert_eq!(err, EncodingFailure::DataTooLong);
        let err: EncodingFailure = qrcode::types::QrError::InvalidCharacter.into();
        assert!(matches!(err, EncodingFailure::Unsupported(_)));
    }

    #[test]
    fn test_display() {
        let err = Error::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "Index 5 out of range for 2 saved codes");
        let err = Error::from(EncodingFailure::EmptyData);
        assert_eq!(err.to_string(), "QR encoding failed: Empty data");
    }
}

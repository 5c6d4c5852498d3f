mod matrix;

pub use matrix::QrMatrix;

use serde::{Deserialize, Serialize};

use crate::common::{EncodingFailure, DEFAULT_QUIET_ZONE};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ECLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Turns a payload into a module matrix. Implementations must be deterministic.
pub trait QrEncoder {
    fn encode(&self, payload: &[u8]) -> Result<QrMatrix, EncodingFailure>;
}

/// [`QrEncoder`] backed by the `qrcode` crate. Picks the smallest version that fits.
#[derive(Debug, Clone, Copy)]
pub struct QrcodeEncoder {
    ec_level: ECLevel,
    quiet_zone: usize,
}

impl Default for QrcodeEncoder {
    fn default() -> Self {
        Self::new(ECLevel::M, DEFAULT_QUIET_ZONE)
    }
}

impl QrcodeEncoder {
    pub fn new(ec_level: ECLevel, quiet_zone: usize) -> Self {
        Self { ec_level, quiet_zone }
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }
}

impl QrEncoder for QrcodeEncoder {
    fn encode(&self, payload: &[u8]) -> Result<QrMatrix, EncodingFailure> {
        if payload.is_empty() {
            return Err(EncodingFailure::EmptyData);
        }

        let code = qrcode::QrCode::with_error_correction_level(payload, self.ec_level.into())?;
        let grid = code.to_colors().into_iter().map(|c| c == qrcode::Color::Dark).collect();
        let matrix = QrMatrix::from_grid(grid, code.width());

        Ok(matrix.with_quiet_zone(self.quiet_zone))
    }
}

impl<E: QrEncoder + ?Sized> QrEncoder for &E {
    fn encode(&self, payload: &[u8]) -> Result<QrMatrix, EncodingFailure> {
        (**self).encode(payload)
    }
}

impl<E: QrEncoder + ?Sized> QrEncoder for Box<E> {
    fn encode(&self, payload: &[u8]) -> Result<QrMatrix, EncodingFailure> {
        (**self).encode(payload)
    }
}

#[cfg(test)]
mod encoder_tests {
    use test_case::test_case;

    use super::{ECLevel, QrEncoder, QrcodeEncoder};
    use crate::common::EncodingFailure;

    #[test_case(ECLevel::L)]
    #[test_case(ECLevel::M)]
    #[test_case(ECLevel::Q)]
    #[test_case(ECLevel::H)]
    fn test_version_1_width(ecl: ECLevel) {
        let matrix = QrcodeEncoder::new(ecl, 0).encode(b"OK").unwrap();
        assert_eq!(matrix.width(), 21);
        assert_eq!(matrix.height(), 21);
    }

    #[test]
    fn test_quiet_zone_applied() {
        let bare = QrcodeEncoder::new(ECLevel::M, 0).encode(b"https://example.com").unwrap();
        let padded = QrcodeEncoder::new(ECLevel::M, 4).encode(b"https://example.com").unwrap();
        assert_eq!(padded.width(), bare.width() + 8);
        assert_eq!(padded.count_dark_modules(), bare.count_dark_modules());
    }

    #[test]
    fn test_finder_corner_is_dark() {
        let matrix = QrcodeEncoder::new(ECLevel::M, 0).encode(b"Hello, world!").unwrap();
        let w = matrix.width();
        assert!(matrix.is_dark(0, 0));
        assert!(matrix.is_dark(w - 1, 0));
        assert!(matrix.is_dark(0, w - 1));
    }

    #[test]
    fn test_deterministic() {
        let enc = QrcodeEncoder::default();
        assert_eq!(enc.encode("Hello 🌏".as_bytes()), enc.encode("Hello 🌏".as_bytes()));
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(QrcodeEncoder::default().encode(b""), Err(EncodingFailure::EmptyData));
    }

    #[test]
    fn test_data_too_long() {
        let data = "1234567890".repeat(306);
        let res = QrcodeEncoder::new(ECLevel::H, 0).encode(data.as_bytes());
        assert_eq!(res, Err(EncodingFailure::DataTooLong));
    }
}

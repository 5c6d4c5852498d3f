use std::path::Path;

use serde::Deserialize;

use super::{color::Color, error::Error};
use crate::encoder::ECLevel;
use crate::session::Protocol;

pub const DEFAULT_SCALE: u32 = 10;
/// Largest accepted module edge in pixels; bigger scales are clamped when rendering.
pub const MAX_SCALE: u32 = 256;
pub const DEFAULT_CORNER_RADIUS: u32 = 20;
pub const DEFAULT_QUIET_ZONE: usize = 4;
pub const DEFAULT_STORAGE_KEY: &str = "savedQRCodes";

// Shuffle mode
//------------------------------------------------------------------------------

/// How [`crate::QrSession::shuffle_colors`] picks new colours.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    /// Foreground and background each become an independent uniform RGB triple.
    #[default]
    FullRgb,
    /// Only the foreground changes, drawn from [`SHUFFLE_PALETTE`].
    Palette,
}

pub const SHUFFLE_PALETTE: [Color; 6] =
    [Color::BLACK, Color::RED, Color::ORANGE, Color::GREEN, Color::BLUE, Color::PURPLE];

// Config
//------------------------------------------------------------------------------

/// Session and store settings. Every field is optional in TOML and falls back to its default.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pixels per module edge.
    pub scale: u32,
    /// Corner radius of the rounded presentation mask, in pixels.
    pub corner_radius: u32,
    /// Light border added around the matrix, in modules.
    pub quiet_zone: usize,
    pub ec_level: ECLevel,
    /// Key the saved-code list is persisted under.
    pub storage_key: String,
    pub shuffle: ShuffleMode,
    pub default_protocol: Protocol,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            corner_radius: DEFAULT_CORNER_RADIUS,
            quiet_zone: DEFAULT_QUIET_ZONE,
            ec_level: ECLevel::M,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            shuffle: ShuffleMode::FullRgb,
            default_protocol: Protocol::Https,
            foreground: Color::BLACK,
            background: Color::WHITE,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, Error> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod config_tests {
    use std::io::Write;

    use super::{Config, ShuffleMode};
    use crate::{Color, ECLevel, Protocol};

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scale, 10);
        assert_eq!(config.corner_radius, 20);
        assert_eq!(config.storage_key, "savedQRCodes");
        assert_eq!(config.default_protocol, Protocol::Https);
        assert_eq!(config.foreground, Color::BLACK);
        assert_eq!(config.background, Color::WHITE);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_toml() {
        let toml = r##"
            scale = 4
            ec_level = "H"
            shuffle = "palette"
            default_protocol = ""
            foreground = "#007AFF"
        "##;
        let config = Config::from_toml_str(toml).unwrap();
        assert_eq!(config.scale, 4);
        assert_eq!(config.ec_level, ECLevel::H);
        assert_eq!(config.shuffle, ShuffleMode::Palette);
        assert_eq!(config.default_protocol, Protocol::None);
        assert_eq!(config.foreground, Color::BLUE);
        assert_eq!(config.background, Color::WHITE);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml_str("foreground = \"#zz\"").is_err());
        assert!(Config::from_toml_str("unknown_key = 1").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "quiet_zone = 1").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.quiet_zone, 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, crate::Error::ConfigRead { .. }));
    }
}

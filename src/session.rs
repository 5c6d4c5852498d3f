use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clipboard::Clipboard;
use crate::common::{Color, Config, Error, ShuffleMode, SHUFFLE_PALETTE};
use crate::encoder::{QrEncoder, QrcodeEncoder};
use crate::render::{render, CornerStyle, QrImage};

// Protocol
//------------------------------------------------------------------------------

/// Scheme prepended to the user's text as `<scheme>://<text>`. `None` is the empty scheme.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    #[serde(rename = "https")]
    Https,
    #[serde(rename = "http")]
    Http,
    #[serde(rename = "")]
    None,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
            Self::None => "",
        }
    }

    /// Full payload for `text`, or `None` when there is nothing to encode.
    pub fn payload(&self, text: &str) -> Option<String> {
        if text.is_empty() {
            return None;
        }
        Some(format!("{}://{text}", self.as_str()))
    }
}

impl Display for Protocol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "https" => Ok(Self::Https),
            "http" => Ok(Self::Http),
            "" => Ok(Self::None),
            _ => Err(Error::InvalidProtocol(s.to_string())),
        }
    }
}

// Session
//------------------------------------------------------------------------------

/// Editable QR state. Every setter regenerates the displayed image before returning.
pub struct QrSession<E = QrcodeEncoder> {
    encoder: E,
    config: Config,
    raw_input: String,
    protocol: Protocol,
    foreground: Color,
    background: Color,
    corner_style: CornerStyle,
    current: Option<QrImage>,
    revision: u64,
}

impl QrSession {
    pub fn new(config: Config) -> Self {
        let encoder = QrcodeEncoder::new(config.ec_level, config.quiet_zone);
        Self::with_encoder(encoder, config)
    }
}

impl Default for QrSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<E: QrEncoder> QrSession<E> {
    pub fn with_encoder(encoder: E, config: Config) -> Self {
        Self {
            encoder,
            raw_input: String::new(),
            protocol: config.default_protocol,
            foreground: config.foreground,
            background: config.background,
            corner_style: CornerStyle::Square,
            current: None,
            revision: 0,
            config,
        }
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn corner_style(&self) -> CornerStyle {
        self.corner_style
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bumped on every state change; stamped on each generated image.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn payload(&self) -> Option<String> {
        self.protocol.payload(&self.raw_input)
    }

    /// Currently displayed image.
    pub fn current(&self) -> Option<&QrImage> {
        self.current.as_ref()
    }

    pub fn set_input(&mut self, text: impl Into<String>) -> Option<&QrImage> {
        self.raw_input = text.into();
        self.regenerate()
    }

    pub fn set_protocol(&mut self, protocol: Protocol) -> Option<&QrImage> {
        self.protocol = protocol;
        self.regenerate()
    }

    pub fn set_foreground(&mut self, color: Color) -> Option<&QrImage> {
        self.foreground = color;
        self.regenerate()
    }

    pub fn set_background(&mut self, color: Color) -> Option<&QrImage> {
        self.background = color;
        self.regenerate()
    }

    pub fn set_corner_style(&mut self, style: CornerStyle) -> Option<&QrImage> {
        self.corner_style = style;
        self.regenerate()
    }

    pub fn shuffle_colors(&mut self) -> Option<&QrImage> {
        self.shuffle_colors_with(&mut rand::rng())
    }

    pub fn shuffle_colors_with<R: Rng>(&mut self, rng: &mut R) -> Option<&QrImage> {
        match self.config.shuffle {
            ShuffleMode::FullRgb => {
                self.foreground = random_color(rng);
                self.background = random_color(rng);
            }
            ShuffleMode::Palette => {
                self.foreground = SHUFFLE_PALETTE[rng.random_range(0..SHUFFLE_PALETTE.len())];
            }
        }
        tracing::debug!(fg = %self.foreground, bg = %self.background, "Shuffled colors");
        self.regenerate()
    }

    /// Uses the clipboard text as input. Returns whether the input changed.
    pub fn prefill_from_clipboard<C: Clipboard + ?Sized>(&mut self, clipboard: &C) -> bool {
        match clipboard.read_text() {
            Some(text) if text != self.raw_input => {
                self.set_input(text);
                true
            }
            _ => false,
        }
    }

    fn regenerate(&mut self) -> Option<&QrImage> {
        self.revision += 1;
        self.generate()
    }

    /// Re-renders the current state and makes it the displayed image.
    /// Empty input or an encoder rejection yields no image.
    pub fn generate(&mut self) -> Option<&QrImage> {
        self.current = self.render_state();
        self.current.as_ref()
    }

    fn render_state(&self) -> Option<QrImage> {
        let payload = self.payload()?;

        let matrix = match self.encoder.encode(payload.as_bytes()) {
            Ok(m) => m,
            Err(err) => {
                tracing::warn!(%err, len = payload.len(), "Payload rejected by encoder");
                return None;
            }
        };

        let mut img = render(
            &matrix,
            self.foreground,
            self.background,
            self.config.scale,
            self.corner_style,
        );
        img.revision = self.revision;
        tracing::debug!(
            revision = self.revision,
            modules = matrix.width(),
            px = img.width(),
            "Generated QR"
        );
        Some(img)
    }
}

fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::from_unit(rng.random::<f64>(), rng.random::<f64>(), rng.random::<f64>())
}


#[cfg(test)]
mod session_tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{Protocol, QrSession};
    use crate::clipboard::StaticClipboard;
    use crate::common::{Color, Config, EncodingFailure, ShuffleMode, SHUFFLE_PALETTE};
    use crate::encoder::{QrEncoder, QrMatrix};
    use crate::render::CornerStyle;

    struct Rejecting;

    impl QrEncoder for Rejecting {
        fn encode(&self, _: &[u8]) -> Result<QrMatrix, EncodingFailure> {
            Err(EncodingFailure::DataTooLong)
        }
    }

    #[test]
    fn test_defaults() {
        let session = QrSession::default();
        assert_eq!(session.raw_input(), "");
        assert_eq!(session.protocol(), Protocol::Https);
        assert_eq!(session.foreground(), Color::BLACK);
        assert_eq!(session.background(), Color::WHITE);
        assert_eq!(session.corner_style(), CornerStyle::Square);
        assert!(session.current().is_none());
        assert!(session.payload().is_none());
    }

    #[test]
    fn test_empty_input_clears_image() {
        let mut session = QrSession::default();
        assert!(session.set_input("example.com").is_some());
        assert!(session.set_input("").is_none());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_setters_regenerate() {
        let mut session = QrSession::default();
        session.set_input("example.com");
        let before = session.current().cloned().unwrap();

        let after = session.set_foreground(Color::RED).cloned().unwrap();
        assert_ne!(before.raster(), after.raster());
        assert!(after.raster().pixels().any(|p| *p == Color::RED.to_rgb()));

        let rounded = session.set_corner_style(CornerStyle::Rounded).cloned().unwrap();
        assert_eq!(rounded.corner_style(), CornerStyle::Rounded);
        assert_eq!(rounded.raster(), after.raster());
        assert!(rounded.revision() > after.revision());
    }

    #[test]
    fn test_protocol_changes_payload() {
        let mut session = QrSession::default();
        session.set_input("example.com");
        assert_eq!(session.payload().as_deref(), Some("https://example.com"));
        session.set_protocol(Protocol::None);
        assert_eq!(session.payload().as_deref(), Some("://example.com"));
        assert!(session.current().is_some());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let mut session = QrSession::default();
        session.set_input("idempotent");
        let a = session.generate().unwrap().to_png().unwrap();
        let b = session.generate().unwrap().to_png().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encoder_rejection_is_no_image() {
        let mut session = QrSession::with_encoder(Rejecting, Config::default());
        assert!(session.set_input("anything").is_none());
        assert_eq!(session.payload().as_deref(), Some("https://anything"));
    }

    #[test]
    fn test_shuffle_full_rgb_is_seeded() {
        let mut a = QrSession::default();
        let mut b = QrSession::default();
        a.set_input("x");
        b.set_input("x");
        a.shuffle_colors_with(&mut StdRng::seed_from_u64(7));
        b.shuffle_colors_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a.foreground(), b.foreground());
        assert_eq!(a.background(), b.background());
        assert_eq!(a.current().map(|i| i.raster()), b.current().map(|i| i.raster()));
    }

    #[test]
    fn test_shuffle_full_rgb_spans_channels() {
        let mut session = QrSession::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut reds = std::collections::HashSet::new();
        for _ in 0..64 {
            session.shuffle_colors_with(&mut rng);
            reds.insert(session.foreground().r);
            reds.insert(session.background().r);
        }
        assert!(reds.len() > 32);
    }

    #[test]
    fn test_shuffle_palette_keeps_background() {
        let config = Config { shuffle: ShuffleMode::Palette, ..Config::default() };
        let mut session = QrSession::new(config);
        session.set_background(Color::new(1, 2, 3));
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            session.shuffle_colors_with(&mut rng);
            assert!(SHUFFLE_PALETTE.contains(&session.foreground()));
            assert_eq!(session.background(), Color::new(1, 2, 3));
        }
    }

    #[test]
    fn test_prefill_from_clipboard() {
        let mut session = QrSession::default();
        assert!(!session.prefill_from_clipboard(&StaticClipboard::empty()));
        assert!(session.prefill_from_clipboard(&StaticClipboard::new("copied.org")));
        assert_eq!(session.raw_input(), "copied.org");
        assert!(session.current().is_some());
        assert!(!session.prefill_from_clipboard(&StaticClipboard::new("copied.org")));
    }

    #[test]
    fn test_config_scale_and_quiet_zone() {
        let config = Config { scale: 2, quiet_zone: 0, ..Config::default() };
        let mut session = QrSession::new(config);
        let img = session.set_input("a").cloned().unwrap();
        // "https://a" fits version 1
        assert_eq!(img.width(), 21 * 2);
    }
}

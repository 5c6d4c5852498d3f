//! # qrtint
//!
//! Generate colourised QR codes from text and keep an ordered collection of saved codes.
//!
//! ## Features
//!
//! - **Sessions**: Edit the text, protocol prefix, colours and corner style; every change
//!   regenerates the displayed QR
//! - **Rendering**: Nearest-neighbour upscaling with a per-pixel foreground/background remap,
//!   plus an optional rounded-corner presentation mask
//! - **Saved codes**: An ordered list of PNG-encoded codes, written through to a pluggable
//!   key-value store after every change
//!
//! QR encoding itself is delegated to the [`qrcode`] crate behind the [`QrEncoder`] trait.
//!
//! ## Quick Start
//!
//! ### Generating a QR code
//!
//! ```rust
//! use qrtint::{Color, Protocol, QrSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = QrSession::default();
//! session.set_protocol(Protocol::Https);
//! session.set_foreground(Color::BLUE);
//!
//! let img = session.set_input("example.com").expect("non-empty input");
//! let png = img.to_png()?;
//! # assert!(!png.is_empty());
//! assert_eq!(session.payload().as_deref(), Some("https://example.com"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Saving codes
//!
//! ```rust
//! use qrtint::{MemoryStore, QrSession, SavedCodeStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = SavedCodeStore::load(MemoryStore::new(), "savedQRCodes");
//! let mut session = QrSession::default();
//!
//! for text in ["a.example", "b.example", "c.example"] {
//!     let img = session.set_input(text).expect("non-empty input").clone();
//!     store.save(img.raster(), text)?;
//! }
//! store.move_item(0, 2)?;
//! store.delete([1])?;
//!
//! let texts: Vec<_> = store.iter().map(|c| c.text()).collect();
//! assert_eq!(texts, ["b.example", "a.example"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`Config`] can be built in code or loaded from TOML; every key is optional:
//!
//! ```toml
//! scale = 10
//! corner_radius = 20
//! quiet_zone = 4
//! ec_level = "M"
//! storage_key = "savedQRCodes"
//! shuffle = "full_rgb"      # or "palette"
//! default_protocol = "https" # "http", or "" for a bare "://" prefix
//! foreground = "#000000"
//! background = "#FFFFFF"
//! ```

pub mod clipboard;
pub(crate) mod common;
pub mod encoder;
pub mod render;
pub mod session;
pub mod store;

pub use clipboard::{Clipboard, StaticClipboard};
pub use common::{
    Color, Config, EncodingFailure, Error, Result, ShuffleMode, DEFAULT_CORNER_RADIUS,
    DEFAULT_SCALE, DEFAULT_STORAGE_KEY, MAX_SCALE, SHUFFLE_PALETTE,
};
pub use encoder::{ECLevel, QrEncoder, QrMatrix, QrcodeEncoder};
pub use render::{recolor, render, CornerStyle, QrImage};
pub use session::{Protocol, QrSession};
pub use store::{FileStore, KvStore, MemoryStore, SavedCodeStore, SavedQrCode};

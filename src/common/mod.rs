pub mod color;
pub mod config;
pub mod error;

pub use color::*;
pub use config::*;
pub use error::*;

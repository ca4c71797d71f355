//! lexa - reading-accessibility rendering and narration
//!
//! Turns generated study text into reading-aid representations (bionic
//! emphasis, syllable breaks, micro-chunked bullets) and narrates it through
//! a text-to-speech engine with play/pause/resume/rate-change semantics.

pub mod content;
pub mod error;
pub mod focus;
pub mod speech;
pub mod state;
pub mod transform;

pub use error::{LexaError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "lexa";

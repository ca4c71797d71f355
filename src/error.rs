//! Error types for lexa

use std::io;
use thiserror::Error;

/// Main error type for lexa
#[derive(Error, Debug)]
pub enum LexaError {
    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Content error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for lexa operations
pub type Result<T> = std::result::Result<T, LexaError>;

impl From<String> for LexaError {
    fn from(s: String) -> Self {
        LexaError::Other(s)
    }
}

impl From<&str> for LexaError {
    fn from(s: &str) -> Self {
        LexaError::Other(s.to_string())
    }
}

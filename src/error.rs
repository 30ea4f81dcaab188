//! Error types for hilite

use thiserror::Error;

/// Result type alias for hilite operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Highlighting error types
///
/// Scanning itself never fails: malformed source is highlighted on a
/// best-effort basis. These errors come from the facade and the CLI.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),
}

impl From<toml::de::Error> for HighlightError {
    fn from(err: toml::de::Error) -> Self {
        HighlightError::Config(err.message().to_string())
    }
}

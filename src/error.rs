//! Error types for the LaTeX editor core

use thiserror::Error;

/// Result type alias for editor operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid range {start}..{end} for buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("Invalid pattern for rule '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid font size: {0}")]
    InvalidFontSize(String),

    #[error("Unknown preference: {0}")]
    UnknownPreference(String),

    #[error("Cannot parse settings: {0}")]
    ParseSettings(#[from] toml::de::Error),

    #[error("Cannot write settings: {0}")]
    WriteSettings(#[from] toml::ser::Error),
}

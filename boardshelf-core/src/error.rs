//! Error types for boardshelf.

use thiserror::Error;

/// Errors that can occur in boardshelf operations.
#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Game night not found: {0}")]
    GameNightNotFound(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid search radius: {0} km")]
    InvalidRadius(f64),

    #[error("Could not parse '{value}' as {expected}")]
    Parse { value: String, expected: &'static str },

    #[error("ICS generation error: {0}")]
    IcsGenerate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ShelfError {
    pub(crate) fn parse(value: &str, expected: &'static str) -> Self {
        ShelfError::Parse {
            value: value.to_string(),
            expected,
        }
    }
}

impl From<serde_json::Error> for ShelfError {
    fn from(e: serde_json::Error) -> Self {
        ShelfError::Serialization(e.to_string())
    }
}

/// Result type alias for boardshelf operations.
pub type ShelfResult<T> = Result<T, ShelfError>;

//! Error types for Cinder

use thiserror::Error;

/// The main error type for Cinder operations
#[derive(Debug, Error)]
pub enum CinderError {
    /// Brace mismatch, missing section name or wrong argument count
    #[error("Structural error at line {line}: {message}")]
    Structural { line: usize, message: String },

    #[error("Number format error at line {line}: '{value}' is not a number")]
    NumberFormat { line: usize, value: String },

    /// Malformed vector or colour arguments; the loader resyncs at the next brace
    #[error("Format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No particle system named {0}")]
    UnknownScript(String),

    #[error("Material error: {0}")]
    Material(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl CinderError {
    pub fn structural(line: usize, message: impl Into<String>) -> Self {
        CinderError::Structural {
            line,
            message: message.into(),
        }
    }

    pub fn format(line: usize, message: impl Into<String>) -> Self {
        CinderError::Format {
            line,
            message: message.into(),
        }
    }

    /// Errors the loader logs and skips instead of aborting the file
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CinderError::NumberFormat { .. } | CinderError::Format { .. }
        )
    }
}

/// Result type alias for Cinder operations
pub type Result<T> = std::result::Result<T, CinderError>;

impl From<toml::de::Error> for CinderError {
    fn from(err: toml::de::Error) -> Self {
        CinderError::TomlParse(err.to_string())
    }
}

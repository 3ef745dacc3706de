//! Error types for schema loading and initialization.

use thiserror::Error;

/// Error type for schema loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid document structure.
    #[error("invalid schema structure in '{document}': {message}")]
    InvalidStructure {
        /// Document identity or source name.
        document: String,
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Creates an invalid structure error.
    pub fn invalid_structure(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            document: document.into(),
            message: message.into(),
        }
    }
}

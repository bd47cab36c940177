//! Error types for the shadow engine.

use thiserror::Error;

/// Errors that can occur while building or analysing a polyhedron.
#[derive(Error, Debug)]
pub enum ShadowError {
    /// The polyhedron description is malformed (bad index, short facet, ...).
    #[error("invalid polyhedron description: {0}")]
    InvalidDescription(String),

    /// Invalid shadow settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Malformed `.geom` text.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// Line number (1-indexed).
        line: usize,
        /// Error message.
        message: String,
    },

    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML settings file.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl ShadowError {
    /// Create an invalid description error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidDescription(message.into())
    }

    /// Create a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for shadow operations.
pub type Result<T> = std::result::Result<T, ShadowError>;

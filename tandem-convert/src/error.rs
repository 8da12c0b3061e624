//! Error types for conversion operations

use std::fmt;

/// Errors that can occur while converting between Markdown and editor HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConvertError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for ConvertError {}

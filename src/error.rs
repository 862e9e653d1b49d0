//! Error types for aerowire
//!
//! Provides a unified error type for every codec operation.

use thiserror::Error;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for aerowire operations
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    /// Bad frame version, truncated buffer, invalid UTF-8, or a declared
    /// length that does not match the bytes actually consumed.
    #[error("Format error: {0}")]
    Format(String),

    /// Unknown or unimplemented type tag, or a value kind that has no wire form
    /// in the position it was used.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    // -------------------------------------------------------------------------
    // Server Status Errors
    // -------------------------------------------------------------------------
    #[error("Server returned status {code}: {message}")]
    ProtocolStatus { code: u8, message: String },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WireError {
    pub fn is_format(&self) -> bool {
        matches!(self, WireError::Format(_))
    }

    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, WireError::UnsupportedType(_))
    }

    /// Server status code carried by a `ProtocolStatus` error
    pub fn status_code(&self) -> Option<u8> {
        match self {
            WireError::ProtocolStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

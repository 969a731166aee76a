//! Core error type for ass-tools operations
//!
//! Provides the main `CoreError` enum shared by the codec, the field locator,
//! the document parser/serializer and the event rewrite engine.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` in the library)
//! - Structural violations are unrecoverable for the current document
//! - Soft conditions are diagnostics, never errors

use core::fmt;
use thiserror::Error;

/// Main error type for ass-tools core operations
///
/// Every fallible operation in the crate returns this type. The variants map
/// onto the kinds reported by [`CoreError::kind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Referenced file or section is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Structural violation of the script format
    #[error("Format error: {0}")]
    Format(String),

    /// Malformed or out-of-range timestamp
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// Policy-level violation such as a negative resulting timestamp
    #[error("Invalid value: {0}")]
    Value(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Contract violation between components (should not happen)
    #[error("Internal error: {0} (this is a bug, please report)")]
    Internal(String),
}

impl CoreError {
    /// Create format error from message
    pub fn format<T: fmt::Display>(message: T) -> Self {
        Self::Format(message.to_string())
    }

    /// Create not-found error from message
    pub fn not_found<T: fmt::Display>(message: T) -> Self {
        Self::NotFound(message.to_string())
    }

    /// Create value error from message
    pub fn value<T: fmt::Display>(message: T) -> Self {
        Self::Value(message.to_string())
    }

    /// Create internal error (indicates a bug)
    pub fn internal<T: fmt::Display>(message: T) -> Self {
        Self::Internal(message.to_string())
    }

    /// Check if error is recoverable by fixing the input
    ///
    /// Format, time and value errors point at the input document or the
    /// caller's arguments. I/O and internal errors do not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::NotFound(_) | Self::Format(_) | Self::InvalidTime(_) | Self::Value(_) => true,
            Self::Io(_) | Self::Internal(_) => false,
        }
    }

    /// Check if error indicates a bug in the library
    #[must_use]
    pub const fn is_internal_bug(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;

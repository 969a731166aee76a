//! Error kinds for filtering and reporting
//!
//! Groups `CoreError` variants into the coarse kinds callers branch on:
//! missing inputs, structural format violations, and policy-level value
//! violations.

use super::CoreError;
use core::fmt;

/// Coarse error kind
///
/// # Examples
///
/// ```rust
/// use ass_tools_core::utils::errors::{CoreError, ErrorKind};
///
/// let error = CoreError::invalid_time("1:2:3", "minutes must have two digits");
/// assert_eq!(error.kind(), ErrorKind::Format);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Referenced file or section missing
    NotFound,

    /// Structural violation: bad header, bad Format declaration, malformed
    /// timestamp, duplicate or missing field names
    Format,

    /// Policy-level violation, e.g. a negative resulting timestamp
    Value,

    /// Problems reading or writing files
    Io,

    /// Errors that indicate bugs in the library itself
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ErrorKind {
    /// Get human-readable kind name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::Format => "format",
            Self::Value => "value",
            Self::Io => "io",
            Self::Internal => "internal",
        }
    }
}

impl CoreError {
    /// Get the error kind for filtering/grouping
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Format(_) | Self::InvalidTime(_) => ErrorKind::Format,
            Self::Value(_) => ErrorKind::Value,
            Self::Io(_) => ErrorKind::Io,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

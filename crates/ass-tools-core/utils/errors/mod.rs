//! Error types for ass-tools
//!
//! Provides the `CoreError` enum, its coarse `ErrorKind`, and helper
//! constructors used across the codec, locator, parser and rewrite engine.
//!
//! # Examples
//!
//! ```rust
//! use ass_tools_core::utils::errors::{CoreError, ErrorKind};
//!
//! let err = CoreError::format("'Text' field must appear in last place");
//! assert_eq!(err.kind(), ErrorKind::Format);
//! assert!(err.is_recoverable());
//! ```

mod category;
mod core_error;

pub use category::ErrorKind;
pub use core_error::{CoreError, Result};

impl CoreError {
    /// Create time error from the offending text and reason
    pub fn invalid_time<T: ::core::fmt::Display>(time: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{time}': {reason}"))
    }
}

/// Convert from standard I/O errors
impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(format!("{err}"))
        } else {
            Self::Io(format!("{err}"))
        }
    }
}

/// Convert from integer parse errors
impl From<::core::num::ParseIntError> for CoreError {
    fn from(err: ::core::num::ParseIntError) -> Self {
        Self::InvalidTime(format!("Integer parse error: {err}"))
    }
}

/// Convert from float parse errors
impl From<::core::num::ParseFloatError> for CoreError {
    fn from(err: ::core::num::ParseFloatError) -> Self {
        Self::InvalidTime(format!("Float parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_creation_methods() {
        assert!(matches!(CoreError::format("x"), CoreError::Format(_)));
        assert!(matches!(CoreError::value("x"), CoreError::Value(_)));
        assert!(matches!(
            CoreError::invalid_time("1:00", "wrong arity"),
            CoreError::InvalidTime(_)
        ));
    }

    #[test]
    fn error_display() {
        let error = CoreError::invalid_time("0:0:00.00", "minutes must have two digits");
        let display = error.to_string();
        assert!(display.contains("Invalid time format"));
        assert!(display.contains("0:0:00.00"));
        assert!(display.contains("two digits"));
    }

    #[test]
    fn error_conversion() {
        let parse_int_err = "abc".parse::<u32>().unwrap_err();
        let core_err: CoreError = parse_int_err.into();
        assert!(matches!(core_err, CoreError::InvalidTime(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(CoreError::from(io_err), CoreError::NotFound(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(CoreError::from(io_err), CoreError::Io(_)));
    }

    #[test]
    fn error_properties() {
        assert!(CoreError::value("negative").is_recoverable());
        assert!(!CoreError::internal("oops").is_recoverable());
        assert!(CoreError::internal("oops").is_internal_bug());
    }
}

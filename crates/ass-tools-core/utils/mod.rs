//! Utility functions and shared types for ass-tools core
//!
//! Contains the crate-wide error type and BOM helpers used by the parser and
//! serializer.

pub mod bom;
pub mod errors;

pub use bom::{strip_bom, UTF8_BOM};
pub use errors::{CoreError, ErrorKind};

//! Byte Order Mark handling
//!
//! Scripts are UTF-8 and may start with the UTF-8 BOM (`EF BB BF`). The
//! parser strips it and records its presence so the serializer can emit it
//! again.
//!
//! # Examples
//!
//! ```rust
//! use ass_tools_core::utils::bom::strip_bom;
//!
//! let (stripped, had_bom) = strip_bom("\u{FEFF}[Script Info]");
//! assert_eq!(stripped, "[Script Info]");
//! assert!(had_bom);
//! ```

/// UTF-8 byte order mark as it appears in a decoded `&str`
pub const UTF8_BOM: &str = "\u{FEFF}";

/// UTF-8 byte order mark signature
pub const UTF8_BOM_BYTES: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Detect and strip a UTF-8 BOM from text input
///
/// Zero-copy: returns a slice into the original text together with a flag
/// telling whether a BOM was removed. Only a leading BOM is considered.
#[must_use]
pub fn strip_bom(text: &str) -> (&str, bool) {
    text.strip_prefix(UTF8_BOM)
        .map_or((text, false), |stripped| (stripped, true))
}

/// Check whether raw bytes start with the UTF-8 BOM
#[must_use]
pub fn has_bom(bytes: &[u8]) -> bool {
    bytes.starts_with(UTF8_BOM_BYTES)
}

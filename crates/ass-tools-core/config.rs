//! Format constants for the script dialect
//!
//! The parser, serializer, field locator and rewrite engine all read their
//! delimiters and well-known names from a [`FormatConfig`]. The table is
//! immutable; [`FormatConfig::standard`] describes the ASS v4+ layout.
//!
//! # Example
//!
//! ```rust
//! use ass_tools_core::FormatConfig;
//!
//! let config = FormatConfig::standard();
//! assert_eq!(config.field_delimiter, ',');
//! assert!(config.is_multiline_field("fontname"));
//! assert!(!config.is_multiline_field("Title"));
//! ```

/// Immutable table of format constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Separator between fields inside a record's data
    pub field_delimiter: char,
    /// Separator between a record's type and its data (first occurrence)
    pub record_delimiter: char,
    /// Raw lines starting with this character are dropped
    pub comment_prefix: char,
    /// Record types whose data continues over several physical lines
    pub multiline_fields: &'static [&'static str],
    /// Continuation lines shorter than this terminate a multi-line field
    pub continuation_width: usize,
    /// Record type of the schema declaration in the Events section
    pub format_record: &'static str,
    /// Free-text field, required to be last in the Format declaration
    pub text_field: &'static str,
    /// Start timestamp field name
    pub start_field: &'static str,
    /// End timestamp field name
    pub end_field: &'static str,
}

impl FormatConfig {
    /// Standard ASS v4+ constants
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            field_delimiter: ',',
            record_delimiter: ':',
            comment_prefix: ';',
            multiline_fields: &["fontname", "filename"],
            continuation_width: 80,
            format_record: "Format",
            text_field: "Text",
            start_field: "Start",
            end_field: "End",
        }
    }

    /// Check whether a trimmed record type starts a multi-line field
    #[must_use]
    pub fn is_multiline_field(&self, record_type: &str) -> bool {
        self.multiline_fields.contains(&record_type)
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::standard()
    }
}

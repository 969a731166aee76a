//! Field locator for delimiter-separated records
//!
//! Records in the Styles and Events sections are comma-separated values whose
//! order is declared by the section's `Format` record. The locator maps field
//! names to indices, indices to byte spans, and one field order onto another.
//! Spans are half-open byte ranges into the record's data so callers can
//! splice replacement text without touching the surrounding bytes.
//!
//! # Example
//!
//! ```rust
//! use ass_tools_core::locator::{field_index, field_span};
//!
//! let format = "Layer, Start, End, Text";
//! let data = "0,0:00:01.00,0:00:02.00,Hello, world";
//!
//! let index = field_index(format, "Start").unwrap();
//! let span = field_span(data, index).unwrap();
//! assert_eq!(&data[span], "0:00:01.00");
//! ```

use crate::{utils::CoreError, FormatConfig, Result};
use ahash::{HashMap, HashMapExt, HashSet, HashSetExt};
use core::ops::Range;

/// Field lookups bound to one delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLocator {
    /// Separator between fields
    delimiter: char,
}

impl FieldLocator {
    /// Create a locator using the configured field delimiter
    #[must_use]
    pub const fn new(config: &FormatConfig) -> Self {
        Self {
            delimiter: config.field_delimiter,
        }
    }

    /// Locator for the standard `,` delimiter
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(&FormatConfig::standard())
    }

    /// Split a Format declaration into trimmed field names
    pub fn field_names<'a>(&self, format: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        format.split(self.delimiter).map(str::trim)
    }

    /// Number of fields declared by a Format declaration
    #[must_use]
    pub fn field_count(&self, format: &str) -> usize {
        self.field_names(format).count()
    }

    /// Index of `name` in a Format declaration
    ///
    /// Tokens are trimmed before comparison; the first exact match wins.
    #[must_use]
    pub fn field_index(&self, format: &str, name: &str) -> Option<usize> {
        self.field_names(format).position(|field| field == name)
    }

    /// Byte span of field `index` inside `line`
    ///
    /// The delimiter itself is never part of the span, and the last field runs
    /// to the end of the line. An empty span means the field is present but
    /// has no value. Returns `None` when the line has fewer than `index`
    /// delimiters.
    #[must_use]
    pub fn field_span(&self, line: &str, index: usize) -> Option<Range<usize>> {
        let width = self.delimiter.len_utf8();
        let mut start = 0;
        for _ in 0..index {
            start += line[start..].find(self.delimiter)? + width;
        }
        let end = line[start..]
            .find(self.delimiter)
            .map_or(line.len(), |offset| start + offset);
        Some(start..end)
    }

    /// Permutation mapping field order `from` onto field order `to`
    ///
    /// Entry `i` is the position in `to` of the `i`-th field of `from`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] if either declaration repeats a field
    /// name or if a field of `from` is missing from `to`.
    pub fn compute_permutation(&self, from: &str, to: &str) -> Result<Vec<usize>> {
        let mut positions = HashMap::new();
        for (index, name) in self.field_names(to).enumerate() {
            if positions.insert(name, index).is_some() {
                return Err(CoreError::format(format!("duplicated format field '{name}'")));
            }
        }

        let mut seen = HashSet::new();
        let mut permutation = Vec::with_capacity(positions.len());
        for name in self.field_names(from) {
            if !seen.insert(name) {
                return Err(CoreError::format(format!("duplicated format field '{name}'")));
            }
            let position = positions.get(name).ok_or_else(|| {
                CoreError::format(format!("incompatible line formats: '{name}' not found"))
            })?;
            permutation.push(*position);
        }

        Ok(permutation)
    }
}

impl Default for FieldLocator {
    fn default() -> Self {
        Self::standard()
    }
}

/// Reorder `values` with a permutation from [`FieldLocator::compute_permutation`]
///
/// Output slot `i` receives `values[permutation[i]]`.
///
/// # Errors
///
/// Returns [`CoreError::Internal`] when the lengths differ or an index is out
/// of range; both indicate a permutation computed for different formats.
pub fn apply_permutation<T: Clone>(values: &[T], permutation: &[usize]) -> Result<Vec<T>> {
    if values.len() != permutation.len() {
        return Err(CoreError::internal(format!(
            "permutation of length {} applied to {} values",
            permutation.len(),
            values.len()
        )));
    }

    permutation
        .iter()
        .map(|&index| {
            values.get(index).cloned().ok_or_else(|| {
                CoreError::internal(format!(
                    "permutation index {index} out of range for {} values",
                    values.len()
                ))
            })
        })
        .collect()
}

/// [`FieldLocator::field_index`] with the standard delimiter
#[must_use]
pub fn field_index(format: &str, name: &str) -> Option<usize> {
    FieldLocator::standard().field_index(format, name)
}

/// [`FieldLocator::field_span`] with the standard delimiter
#[must_use]
pub fn field_span(line: &str, index: usize) -> Option<Range<usize>> {
    FieldLocator::standard().field_span(line, index)
}

/// [`FieldLocator::compute_permutation`] with the standard delimiter
///
/// # Errors
///
/// See [`FieldLocator::compute_permutation`].
pub fn compute_permutation(from: &str, to: &str) -> Result<Vec<usize>> {
    FieldLocator::standard().compute_permutation(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: &str = "Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

    #[test]
    fn index_of_trimmed_names() {
        assert_eq!(field_index(FORMAT, "Layer"), Some(0));
        assert_eq!(field_index(FORMAT, "Start"), Some(1));
        assert_eq!(field_index(FORMAT, "Text"), Some(9));
        assert_eq!(field_index(FORMAT, "Marked"), None);
        assert_eq!(field_index(FORMAT, "start"), None);
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(field_index("A, B, A", "A"), Some(0));
    }

    #[test]
    fn spans_cover_fields() {
        let line = "0,0:00:01.00,0:00:02.00,Default";
        assert_eq!(field_span(line, 0), Some(0..1));
        assert_eq!(field_span(line, 1), Some(2..12));
        assert_eq!(field_span(line, 3), Some(24..line.len()));
        assert_eq!(field_span(line, 4), None);
    }

    #[test]
    fn empty_fields_are_present() {
        let line = "0,,x,";
        assert_eq!(field_span(line, 1), Some(2..2));
        assert_eq!(field_span(line, 3), Some(5..5));
        assert_eq!(field_span(line, 4), None);
        assert_eq!(field_span("", 0), Some(0..0));
    }

    #[test]
    fn text_field_keeps_commas() {
        let line = "0:00:01.00,0:00:02.00,Hello, world";
        let span = field_span(line, 2).unwrap();
        assert_eq!(&line[span], "Hello");
        assert_eq!(FieldLocator::standard().field_count("Start, End, Text"), 3);
    }

    #[test]
    fn custom_delimiter() {
        let config = FormatConfig {
            field_delimiter: ';',
            ..FormatConfig::standard()
        };
        let locator = FieldLocator::new(&config);
        assert_eq!(locator.field_index("A; B", "B"), Some(1));
        assert_eq!(locator.field_span("1;22", 1), Some(2..4));
    }

    #[test]
    fn permutation_between_orders() {
        let permutation = compute_permutation("Start, End, Text", "Text,Start,End").unwrap();
        assert_eq!(permutation, vec![1, 2, 0]);

        let reordered = apply_permutation(&["t", "s", "e"], &permutation).unwrap();
        assert_eq!(reordered, vec!["s", "e", "t"]);
    }

    #[test]
    fn permutation_subset_is_allowed() {
        let permutation = compute_permutation("End", "Start, End, Text").unwrap();
        assert_eq!(permutation, vec![1]);
    }

    #[test]
    fn permutation_rejects_duplicates_and_missing() {
        assert!(matches!(
            compute_permutation("Start, Start", "Start, End"),
            Err(CoreError::Format(_))
        ));
        assert!(matches!(
            compute_permutation("Start", "End, End"),
            Err(CoreError::Format(_))
        ));
        assert!(matches!(
            compute_permutation("Start, Layer", "Start, End"),
            Err(CoreError::Format(_))
        ));
    }

    #[test]
    fn apply_rejects_bad_permutations() {
        assert!(matches!(
            apply_permutation(&[1, 2], &[0]),
            Err(CoreError::Internal(_))
        ));
        assert!(matches!(
            apply_permutation(&[1, 2], &[0, 2]),
            Err(CoreError::Internal(_))
        ));
    }
}

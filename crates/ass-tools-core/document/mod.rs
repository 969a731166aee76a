//! In-memory script document
//!
//! A [`Document`] holds the records of each recognised section together with
//! the metadata needed for a byte-stable round trip: whether the input
//! carried a BOM, which line-break sequence it used, and an optional
//! free-text header comment emitted right after the `[Script Info]` header.
//!
//! A section is present exactly when it holds at least one record; removing
//! the last record removes the section.
//!
//! # Example
//!
//! ```rust
//! use ass_tools_core::{Document, SectionKind};
//!
//! let mut document = Document::new(false);
//! document.add_line(SectionKind::ScriptInfo, "Title", " Example");
//! document.add_line(SectionKind::Events, "Format", " Start, End, Text");
//!
//! assert!(document.has_section(SectionKind::Events));
//! assert_eq!(
//!     document.serialize()?,
//!     "[Script Info]\nTitle: Example\n\n[Events]\nFormat: Start, End, Text\n"
//! );
//! # Ok::<(), ass_tools_core::CoreError>(())
//! ```

mod parser;
mod record;
mod section;
mod serializer;

#[cfg(feature = "std")]
mod io;

pub use parser::{ContinuationAction, Parser};
pub use record::{EventKind, Record};
pub use section::{LineBreak, SectionKind};
pub use serializer::Serializer;

use crate::{utils::CoreError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Records of one section
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct SectionEntry {
    /// Section identifier
    kind: SectionKind,
    /// Records in input order, never empty
    records: Vec<Record>,
}

/// Whole-script document model
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    /// Emit/was read with a UTF-8 BOM
    has_bom: bool,
    /// Line-break sequence used on output
    line_break: LineBreak,
    /// Free text placed after the `[Script Info]` header
    header_comment: String,
    /// Present sections in the order they were first populated
    sections: Vec<SectionEntry>,
}

impl Document {
    /// Create an empty document
    #[must_use]
    pub const fn new(has_bom: bool) -> Self {
        Self {
            has_bom,
            line_break: LineBreak::Lf,
            header_comment: String::new(),
            sections: Vec::new(),
        }
    }

    /// Empty document sharing this one's BOM, line break and header comment
    #[must_use]
    pub fn derive_empty(&self) -> Self {
        Self {
            has_bom: self.has_bom,
            line_break: self.line_break,
            header_comment: self.header_comment.clone(),
            sections: Vec::new(),
        }
    }

    /// Whether a BOM is emitted
    #[must_use]
    pub const fn has_bom(&self) -> bool {
        self.has_bom
    }

    /// Set whether a BOM is emitted
    pub fn set_bom(&mut self, has_bom: bool) {
        self.has_bom = has_bom;
    }

    /// Line-break sequence
    #[must_use]
    pub const fn line_break(&self) -> LineBreak {
        self.line_break
    }

    /// Set the line-break sequence
    pub fn set_line_break(&mut self, line_break: LineBreak) {
        self.line_break = line_break;
    }

    /// Header comment block, possibly empty
    #[must_use]
    pub fn header_comment(&self) -> &str {
        &self.header_comment
    }

    /// Replace the header comment block
    ///
    /// Multi-line comments must use the document's line break.
    pub fn set_header_comment(&mut self, comment: impl Into<String>) {
        self.header_comment = comment.into();
    }

    /// Whether `kind` holds at least one record
    #[must_use]
    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.entry(kind).is_some()
    }

    /// Records of `kind`, if present
    #[must_use]
    pub fn section(&self, kind: SectionKind) -> Option<&[Record]> {
        self.entry(kind).map(|entry| entry.records.as_slice())
    }

    /// Present sections in the order they were first populated
    pub fn sections(&self) -> impl Iterator<Item = SectionKind> + '_ {
        self.sections.iter().map(|entry| entry.kind)
    }

    /// Present sections in output order
    pub fn canonical_sections(&self) -> impl Iterator<Item = SectionKind> + '_ {
        SectionKind::CANONICAL_ORDER
            .into_iter()
            .filter(|&kind| self.has_section(kind))
    }

    /// Total number of records across all sections
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sections.iter().map(|entry| entry.records.len()).sum()
    }

    /// Append one record to `kind`, creating the section if needed
    pub fn add_line(
        &mut self,
        kind: SectionKind,
        record_type: impl Into<String>,
        data: impl Into<String>,
    ) {
        self.push_record(kind, Record::new(record_type, data));
    }

    /// Append an existing record to `kind`
    pub fn push_record(&mut self, kind: SectionKind, record: Record) {
        if let Some(entry) = self.entry_mut(kind) {
            entry.records.push(record);
        } else {
            self.sections.push(SectionEntry {
                kind,
                records: vec![record],
            });
        }
    }

    /// Append every record of `records` to `kind`
    ///
    /// An empty iterator leaves the document unchanged.
    pub fn insert<I>(&mut self, kind: SectionKind, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        for record in records {
            self.push_record(kind, record);
        }
    }

    /// Remove record `index` of `kind`
    ///
    /// Removing the last record also removes the section.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the section is absent or `index` is
    /// out of range.
    pub fn remove_line(&mut self, kind: SectionKind, index: usize) -> Result<Record> {
        let position = self
            .position(kind)
            .ok_or_else(|| CoreError::not_found(format!("section {kind} not present")))?;
        let entry = &mut self.sections[position];
        if index >= entry.records.len() {
            return Err(CoreError::not_found(format!(
                "record {index} of {kind} (section has {} records)",
                entry.records.len()
            )));
        }

        let record = entry.records.remove(index);
        if entry.records.is_empty() {
            self.sections.remove(position);
        }
        Ok(record)
    }

    /// Remove a whole section, returning its records
    pub fn remove_section(&mut self, kind: SectionKind) -> Option<Vec<Record>> {
        let position = self.position(kind)?;
        Some(self.sections.remove(position).records)
    }

    /// Drop the header comment and all sections, keeping BOM and line break
    pub fn clear(&mut self) {
        self.header_comment.clear();
        self.sections.clear();
    }

    /// Position of `kind` in the membership list
    fn position(&self, kind: SectionKind) -> Option<usize> {
        self.sections.iter().position(|entry| entry.kind == kind)
    }

    /// Entry for `kind`
    fn entry(&self, kind: SectionKind) -> Option<&SectionEntry> {
        self.sections.iter().find(|entry| entry.kind == kind)
    }

    /// Mutable entry for `kind`
    fn entry_mut(&mut self, kind: SectionKind) -> Option<&mut SectionEntry> {
        self.sections.iter_mut().find(|entry| entry.kind == kind)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(true)
    }
}

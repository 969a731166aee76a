//! Document serializer
//!
//! Emits sections in canonical order, separated by a blank line, each as its
//! header line followed by one `type:data` line per record. The header
//! comment, when set, follows the `[Script Info]` header directly.

use super::{Document, SectionKind};
use crate::{
    utils::{CoreError, UTF8_BOM},
    FormatConfig, Result,
};

/// Serializer bound to a format table
#[derive(Debug, Clone, Copy)]
pub struct Serializer<'c> {
    /// Format constants
    config: &'c FormatConfig,
}

impl<'c> Serializer<'c> {
    /// Create a serializer for `config`
    #[must_use]
    pub const fn new(config: &'c FormatConfig) -> Self {
        Self { config }
    }

    /// Serialize `document` into a new string
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] if the document has no Script Info
    /// section.
    pub fn serialize(&self, document: &Document) -> Result<String> {
        let mut out = String::with_capacity(Self::estimate_len(document));
        self.serialize_into(document, &mut out)?;
        Ok(out)
    }

    /// Append the serialized form of `document` to `out`
    ///
    /// Nothing is written when the document is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] if the document has no Script Info
    /// section.
    pub fn serialize_into(&self, document: &Document, out: &mut String) -> Result<()> {
        if !document.has_section(SectionKind::ScriptInfo) {
            return Err(CoreError::format("missing [Script Info] section"));
        }

        let line_break = document.line_break().as_str();

        if document.has_bom() {
            out.push_str(UTF8_BOM);
        }

        for (position, kind) in document.canonical_sections().enumerate() {
            if position > 0 {
                out.push_str(line_break);
            }
            out.push_str(kind.header());

            if kind == SectionKind::ScriptInfo && !document.header_comment().is_empty() {
                out.push_str(line_break);
                out.push_str(document.header_comment());
            }

            for record in document.section(kind).unwrap_or_default() {
                out.push_str(line_break);
                out.push_str(&record.record_type);
                out.push(self.config.record_delimiter);
                out.push_str(&record.data);
            }
            out.push_str(line_break);
        }

        Ok(())
    }

    /// Rough output size for preallocation
    fn estimate_len(document: &Document) -> usize {
        document
            .canonical_sections()
            .filter_map(|kind| document.section(kind))
            .flatten()
            .map(|record| record.record_type.len() + record.data.len() + 3)
            .sum::<usize>()
            + document.header_comment().len()
            + 64
    }
}

impl Document {
    /// Serialize with the standard format table
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] if the document has no Script Info
    /// section.
    pub fn serialize(&self) -> Result<String> {
        Serializer::new(&FormatConfig::standard()).serialize(self)
    }

    /// Serialize into a writer
    ///
    /// The whole document is rendered before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] for a document without Script Info and
    /// [`CoreError::Io`] when writing fails.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        let text = self.serialize()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

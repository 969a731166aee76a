//! Line-oriented script parser
//!
//! Converts raw script text into a [`Document`]. The first line decides the
//! BOM flag and the line-break style and must be the `[Script Info]` header;
//! every later line is split on the detected break sequence and fed through a
//! small state machine tracking the current section, skipped (unrecognised)
//! sections, and an in-progress multi-line field.
//!
//! # Multi-line fields
//!
//! `fontname` and `filename` records carry embedded payloads over many
//! physical lines. Continuation lines are trimmed and appended with the line
//! break between chunks. A line shorter than the continuation width ends the
//! field after being appended. A line starting with a lowercase ASCII letter
//! ends the field without being appended and is dropped, not reparsed as a
//! record; [`ContinuationAction`] isolates that rule so it can be revised in
//! one place.

use super::{Document, LineBreak, Record, SectionKind};
use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
    utils::{strip_bom, CoreError},
    FormatConfig, Result,
};

/// What a continuation line does to the multi-line field in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuationAction {
    /// Append the line, the field continues
    Append,
    /// Append the line, then finish the field
    AppendAndFinish,
    /// Finish the field and drop the line
    FinishAndDiscard,
}

impl ContinuationAction {
    /// Classify a trimmed, non-empty continuation line
    #[must_use]
    pub fn classify(trimmed: &str, config: &FormatConfig) -> Self {
        if trimmed.bytes().next().is_some_and(|b| b.is_ascii_lowercase()) {
            Self::FinishAndDiscard
        } else if trimmed.len() < config.continuation_width {
            Self::AppendAndFinish
        } else {
            Self::Append
        }
    }
}

/// Multi-line field being accumulated
#[derive(Debug)]
struct PendingField {
    /// Trimmed record type (`fontname` / `filename`)
    record_type: String,
    /// Data accumulated so far
    data: String,
}

impl PendingField {
    /// Finish accumulation
    fn into_record(self) -> Record {
        Record {
            record_type: self.record_type,
            data: self.data,
        }
    }
}

/// Script parser bound to a format table
///
/// # Example
///
/// ```rust
/// use ass_tools_core::{FormatConfig, Parser, SectionKind};
///
/// let config = FormatConfig::standard();
/// let (document, diagnostics) =
///     Parser::new(&config).parse("[Script Info]\r\nTitle: x\r\n")?;
///
/// assert_eq!(document.line_break().as_str(), "\r\n");
/// assert_eq!(document.section(SectionKind::ScriptInfo).map(<[_]>::len), Some(1));
/// assert!(diagnostics.is_empty());
/// # Ok::<(), ass_tools_core::CoreError>(())
/// ```
#[derive(Debug)]
pub struct Parser<'c> {
    /// Format constants
    config: &'c FormatConfig,
    /// Soft conditions found while parsing
    diagnostics: Diagnostics,
}

impl<'c> Parser<'c> {
    /// Create a parser for `config`
    #[must_use]
    pub const fn new(config: &'c FormatConfig) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Parse a whole script
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] when the input is empty, the first line
    /// is not the `[Script Info]` header, or a data line lacks the record
    /// delimiter.
    pub fn parse(mut self, input: &str) -> Result<(Document, Diagnostics)> {
        if input.is_empty() {
            return Err(CoreError::format("can't read input: empty script"));
        }

        let (first, rest) = input.split_once('\n').unwrap_or((input, ""));
        let (first, has_bom) = strip_bom(first);
        let line_break = LineBreak::detect(first);

        if first.trim() != SectionKind::ScriptInfo.header() {
            return Err(CoreError::format("not a valid script: missing [Script Info] header"));
        }

        let mut document = Document::new(has_bom);
        document.set_line_break(line_break);

        let mut current = SectionKind::ScriptInfo;
        let mut skipping = false;
        let mut pending: Option<PendingField> = None;

        for (offset, line) in rest.split(line_break.as_str()).enumerate() {
            let line_number = offset + 2;

            if line.starts_with(self.config.comment_prefix) {
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if SectionKind::is_header_line(trimmed) {
                if let Some(field) = pending.take() {
                    document.push_record(current, field.into_record());
                }

                match SectionKind::from_header(trimmed) {
                    Some(kind) => {
                        log::debug!("line {line_number}: entering {kind}");
                        current = kind;
                        skipping = false;
                    }
                    None => {
                        log::debug!("line {line_number}: skipping unknown section {trimmed}");
                        skipping = true;
                    }
                }
                continue;
            }

            if skipping {
                continue;
            }

            if let Some(mut field) = pending.take() {
                match ContinuationAction::classify(trimmed, self.config) {
                    ContinuationAction::Append => {
                        field.data.push_str(line_break.as_str());
                        field.data.push_str(trimmed);
                        pending = Some(field);
                    }
                    ContinuationAction::AppendAndFinish => {
                        field.data.push_str(line_break.as_str());
                        field.data.push_str(trimmed);
                        document.push_record(current, field.into_record());
                    }
                    ContinuationAction::FinishAndDiscard => {
                        document.push_record(current, field.into_record());
                        self.diagnostics.push(
                            Diagnostic::info(
                                DiagnosticKind::DiscardedContinuationLine,
                                format!("line ending a multi-line field was dropped: {trimmed}"),
                            )
                            .at_line(line_number),
                        );
                    }
                }
                continue;
            }

            let (record_type, data) = line
                .split_once(self.config.record_delimiter)
                .ok_or_else(|| {
                    CoreError::format(format!(
                        "line type delimiter not found at line {line_number}: {trimmed}"
                    ))
                })?;
            let record_type = record_type.trim();

            if self.config.is_multiline_field(record_type) {
                pending = Some(PendingField {
                    record_type: record_type.to_string(),
                    data: data.to_string(),
                });
            } else {
                document.add_line(current, record_type, data);
            }
        }

        if let Some(field) = pending {
            document.push_record(current, field.into_record());
        }

        log::debug!(
            "parsed {} records in {} sections (bom: {has_bom}, line break: {line_break:?})",
            document.record_count(),
            document.sections().count()
        );

        Ok((document, self.diagnostics))
    }
}

impl Document {
    /// Parse script text with the standard format table
    ///
    /// Diagnostics are logged and then dropped; use
    /// [`Document::parse_with_diagnostics`] to inspect them.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse`].
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_diagnostics(input).map(|(document, _)| document)
    }

    /// Parse script text with the standard format table, keeping diagnostics
    ///
    /// # Errors
    ///
    /// See [`Parser::parse`].
    pub fn parse_with_diagnostics(input: &str) -> Result<(Self, Diagnostics)> {
        Parser::new(&FormatConfig::standard()).parse(input)
    }
}

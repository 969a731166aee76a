//! Event rewrite engine
//!
//! Rewrites the Start/End fields of every event in a document according to a
//! [`TimingPolicy`], producing one or more output documents. Sections other
//! than Events are copied unchanged into every output.
//!
//! Timestamps are replaced in place: the engine locates the exact byte spans
//! of the Start and End fields and splices the new text into the original
//! record data, so layer numbers, style names, margins and text keep their
//! original spelling and spacing.
//!
//! # Example
//!
//! ```rust
//! use ass_tools_core::rewrite::{EventRewriter, PolicyFn, Routing};
//! use ass_tools_core::{Document, FormatConfig, SectionKind};
//!
//! let script = "[Script Info]\nTitle: Demo\n\n[Events]\n\
//!               Format: Layer, Start, End, Text\n\
//!               Dialogue: 0,0:00:01.00,0:00:02.00,Hello\n";
//! let document = Document::parse(script)?;
//!
//! let config = FormatConfig::standard();
//! let mut delay = PolicyFn::new(1, |_, mut timing, _| {
//!     timing.start = timing.start.map(|start| start + 100);
//!     timing.end = timing.end.map(|end| end + 100);
//!     Ok(Routing::first(timing))
//! });
//!
//! let outcome = EventRewriter::new(&config).rewrite(&document, &mut delay)?;
//! let events = outcome.documents[0].section(SectionKind::Events).unwrap();
//! assert_eq!(events[1].data, " 0,0:00:02.00,0:00:03.00,Hello");
//! # Ok::<(), ass_tools_core::CoreError>(())
//! ```

mod policy;

pub use policy::{EventContext, EventTiming, PolicyFn, Routing, Targets, TimingPolicy};

use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
    locator::FieldLocator,
    timestamp::{format_time, parse_time, Centiseconds, SignedCentiseconds},
    utils::CoreError,
    Document, FormatConfig, Record, Result, SectionKind,
};
use core::ops::Range;

/// Documents produced by a rewrite together with its soft findings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// One document per policy output, in output order
    pub documents: Vec<Document>,
    /// Warnings and notes collected while rewriting
    pub diagnostics: Diagnostics,
}

impl RewriteOutcome {
    /// Output document `index`
    #[must_use]
    pub fn document(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }
}

/// Field positions taken from the Events Format declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EventLayout {
    /// Index of the Start field
    start: usize,
    /// Index of the End field
    end: usize,
}

/// Applies a [`TimingPolicy`] to the Events section of a document
#[derive(Debug, Clone, Copy)]
pub struct EventRewriter<'c> {
    /// Format constants
    config: &'c FormatConfig,
    /// Field lookups using the configured delimiter
    locator: FieldLocator,
}

impl<'c> EventRewriter<'c> {
    /// Create an engine for `config`
    #[must_use]
    pub const fn new(config: &'c FormatConfig) -> Self {
        Self {
            config,
            locator: FieldLocator::new(config),
        }
    }

    /// Rewrite a whole document
    ///
    /// Produces `policy.output_count()` documents, each derived from
    /// `document` (BOM, line break and header comment are shared). A missing
    /// Events section is reported as a [`DiagnosticKind::MissingEvents`]
    /// warning and the other sections are still copied.
    ///
    /// # Errors
    ///
    /// Returns any error from [`EventRewriter::rewrite_events`]. No partial
    /// output is returned.
    pub fn rewrite<P>(&self, document: &Document, policy: &mut P) -> Result<RewriteOutcome>
    where
        P: TimingPolicy + ?Sized,
    {
        let count = Self::checked_output_count(policy)?;
        log::debug!("rewriting events with '{}' into {count} output(s)", policy.name());

        let mut diagnostics = Diagnostics::new();
        let mut documents: Vec<Document> = (0..count).map(|_| document.derive_empty()).collect();
        let mut has_events = false;

        for kind in document.sections() {
            let Some(records) = document.section(kind) else {
                continue;
            };

            if kind == SectionKind::Events {
                has_events = true;
                let lists = self.rewrite_events(records, policy, &mut diagnostics)?;
                for (output, list) in documents.iter_mut().zip(lists) {
                    output.insert(kind, list);
                }
            } else {
                for output in &mut documents {
                    output.insert(kind, records.iter().cloned());
                }
            }
        }

        if !has_events {
            diagnostics.push(Diagnostic::warning(
                DiagnosticKind::MissingEvents,
                "Events section not found".to_string(),
            ));
        }

        Ok(RewriteOutcome {
            documents,
            diagnostics,
        })
    }

    /// Rewrite the records of an Events section
    ///
    /// The first record must be the Format declaration; it is copied to every
    /// output list. Returns one record list per policy output.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Format`] when the Format declaration is missing,
    /// lacks `Start`/`End`, does not end with `Text`, or an event has too few
    /// fields. Timestamp errors and policy errors are passed through.
    /// [`CoreError::Value`] is returned for a negative output timestamp and
    /// [`CoreError::Internal`] for routing outside the declared outputs.
    pub fn rewrite_events<P>(
        &self,
        records: &[Record],
        policy: &mut P,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<Vec<Record>>>
    where
        P: TimingPolicy + ?Sized,
    {
        let count = Self::checked_output_count(policy)?;
        let allowed = Targets::first_n(count);
        let mut outputs: Vec<Vec<Record>> = vec![Vec::with_capacity(records.len()); count];

        let Some((format, events)) = records.split_first() else {
            return Ok(outputs);
        };
        let layout = self.layout(format)?;
        for output in &mut outputs {
            output.push(format.clone());
        }

        for (offset, record) in events.iter().enumerate() {
            let index = offset + 1;
            let start_span =
                self.value_span(record, layout.start, self.config.start_field, index)?;
            let end_span = self.value_span(record, layout.end, self.config.end_field, index)?;

            let kind = record.event_kind();
            let start = Self::decode(&record.data, &start_span)?;
            let end = match kind {
                Some(kind) if !kind.has_duration() => None,
                _ => Self::decode(&record.data, &end_span)?,
            };

            let event = EventContext {
                index,
                record_type: &record.record_type,
                kind,
            };
            let routing = policy.decide(&event, EventTiming::new(start, end), diagnostics)?;

            if !allowed.contains(routing.targets()) {
                return Err(CoreError::internal(format!(
                    "policy '{}' routed record {index} to {:?} but declares {count} output(s)",
                    policy.name(),
                    routing.targets()
                )));
            }

            for (output_index, output) in outputs.iter_mut().enumerate() {
                if let Some(timing) = routing.timing_for(output_index) {
                    let data = splice(&record.data, &start_span, &end_span, timing, index)?;
                    output.push(Record::new(record.record_type.clone(), data));
                }
            }
        }

        log::debug!(
            "rewrote {} event(s); output sizes {:?}",
            events.len(),
            outputs.iter().map(Vec::len).collect::<Vec<_>>()
        );
        Ok(outputs)
    }

    /// Validate the output count declared by `policy`
    fn checked_output_count<P>(policy: &P) -> Result<usize>
    where
        P: TimingPolicy + ?Sized,
    {
        let count = policy.output_count();
        if count == 0 || count > Targets::MAX_OUTPUTS {
            return Err(CoreError::internal(format!(
                "policy '{}' declares {count} outputs, supported range is 1..={}",
                policy.name(),
                Targets::MAX_OUTPUTS
            )));
        }
        Ok(count)
    }

    /// Check the Format declaration and find the Start/End positions
    fn layout(&self, format: &Record) -> Result<EventLayout> {
        if format.record_type != self.config.format_record {
            return Err(CoreError::format("format line must appear first in events"));
        }

        let declaration = &format.data;
        let last = self.locator.field_count(declaration) - 1;
        if self.locator.field_index(declaration, self.config.text_field) != Some(last) {
            return Err(CoreError::format(format!(
                "'{}' field must appear in last place",
                self.config.text_field
            )));
        }

        let find = |name: &str| {
            self.locator.field_index(declaration, name).ok_or_else(|| {
                CoreError::format(format!("'{name}' field not found in format definition string"))
            })
        };

        Ok(EventLayout {
            start: find(self.config.start_field)?,
            end: find(self.config.end_field)?,
        })
    }

    /// Span of a timestamp field with surrounding blanks excluded
    fn value_span(
        &self,
        record: &Record,
        field: usize,
        name: &str,
        index: usize,
    ) -> Result<Range<usize>> {
        let span = self.locator.field_span(&record.data, field).ok_or_else(|| {
            CoreError::format(format!("'{name}' field cannot be retrieved in record {index}"))
        })?;
        Ok(trim_span(&record.data, span))
    }

    /// Parse a timestamp field, `None` when it is empty
    fn decode(data: &str, span: &Range<usize>) -> Result<Option<SignedCentiseconds>> {
        if span.is_empty() {
            return Ok(None);
        }
        let centiseconds = parse_time(&data[span.clone()])?;
        Ok(Some(SignedCentiseconds::from(centiseconds)))
    }
}

/// Narrow `span` so it excludes leading and trailing blanks
fn trim_span(data: &str, span: Range<usize>) -> Range<usize> {
    let field = &data[span.clone()];
    let leading = field.len() - field.trim_start_matches(is_blank).len();
    let trailing = field.len() - field.trim_end_matches(is_blank).len();
    if leading == field.len() {
        return span.start..span.start;
    }
    span.start + leading..span.end - trailing
}

/// Space or tab
const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Render a field value, empty when undefined
fn encode(value: Option<SignedCentiseconds>, index: usize) -> Result<String> {
    let Some(value) = value else {
        return Ok(String::new());
    };
    let value = Centiseconds::try_from(value).map_err(|_| {
        CoreError::value(format!(
            "timestamp {value} cs of record {index} is out of range (negative or too large)"
        ))
    })?;
    format_time(value)
}

/// Replace the Start and End spans of `data`, keeping every other byte
fn splice(
    data: &str,
    start_span: &Range<usize>,
    end_span: &Range<usize>,
    timing: EventTiming,
    index: usize,
) -> Result<String> {
    let start_text = encode(timing.start, index)?;
    let end_text = encode(timing.end, index)?;

    let (first, first_text, second, second_text) = if start_span.start < end_span.start {
        (start_span, start_text, end_span, end_text)
    } else if end_span.start < start_span.start {
        (end_span, end_text, start_span, start_text)
    } else {
        return Err(CoreError::internal(format!(
            "Start and End fields share a position in record {index}"
        )));
    };

    let mut out = String::with_capacity(data.len() + first_text.len() + second_text.len());
    out.push_str(&data[..first.start]);
    out.push_str(&first_text);
    out.push_str(&data[first.end..second.start]);
    out.push_str(&second_text);
    out.push_str(&data[second.end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(lines: &[(&str, &str)]) -> Vec<Record> {
        lines
            .iter()
            .map(|(record_type, data)| Record::new(*record_type, *data))
            .collect()
    }

    fn passthrough() -> PolicyFn<impl FnMut(&EventContext<'_>, EventTiming, &mut Diagnostics) -> Result<Routing>> {
        PolicyFn::new(1, |_: &EventContext<'_>, timing, _: &mut Diagnostics| {
            Ok(Routing::first(timing))
        })
    }

    fn run<P: TimingPolicy>(records: &[Record], policy: &mut P) -> Result<Vec<Vec<Record>>> {
        let config = FormatConfig::standard();
        let mut diagnostics = Diagnostics::new();
        EventRewriter::new(&config).rewrite_events(records, policy, &mut diagnostics)
    }

    #[test]
    fn passthrough_keeps_bytes() {
        let records = events(&[
            ("Format", " Layer, Start, End, Style, Text"),
            ("Dialogue", " 0,0:00:01.00,0:00:02.50,Default,Hello, world"),
            ("Comment", " 0, 0:00:03.00 ,0:00:04.00,Default,note"),
        ]);
        let outputs = run(&records, &mut passthrough()).unwrap();
        assert_eq!(outputs, vec![records]);
    }

    #[test]
    fn end_before_start_is_spliced_in_span_order() {
        let records = events(&[
            ("Format", " End, Start, Text"),
            ("Dialogue", "0:00:02.00,0:00:01.00,Hi"),
        ]);
        let mut shift = PolicyFn::new(1, |_: &EventContext<'_>, timing: EventTiming, _: &mut Diagnostics| {
            Ok(Routing::first(EventTiming::new(
                timing.start.map(|v| v + 1000),
                timing.end.map(|v| v + 2000),
            )))
        });
        let outputs = run(&records, &mut shift).unwrap();
        assert_eq!(outputs[0][1].data, "0:00:22.00,0:00:11.00,Hi");
    }

    #[test]
    fn command_and_sound_have_no_end() {
        let records = events(&[
            ("Format", " Layer, Start, End, Text"),
            ("Command", " 0,0:00:01.00,0:00:09.00,cmd"),
            ("Sound", " 0,0:00:01.00,0:00:09.00,snd"),
            ("Dialogue", " 0,0:00:01.00,0:00:09.00,txt"),
        ]);
        let mut seen = Vec::new();
        let mut policy = PolicyFn::new(1, |_: &EventContext<'_>, timing: EventTiming, _: &mut Diagnostics| {
            seen.push(timing.end);
            Ok(Routing::first(timing))
        });
        let outputs = run(&records, &mut policy).unwrap();
        drop(policy);

        assert_eq!(seen, vec![None, None, Some(900)]);
        assert_eq!(outputs[0][1].data, " 0,0:00:01.00,,cmd");
        assert_eq!(outputs[0][2].data, " 0,0:00:01.00,,snd");
        assert_eq!(outputs[0][3].data, " 0,0:00:01.00,0:00:09.00,txt");
    }

    #[test]
    fn empty_fields_are_undefined() {
        let records = events(&[
            ("Format", " Layer, Start, End, Text"),
            ("Dialogue", " 0,,,text"),
        ]);
        let mut seen = None;
        let mut policy = PolicyFn::new(1, |_: &EventContext<'_>, timing: EventTiming, _: &mut Diagnostics| {
            seen = Some(timing);
            Ok(Routing::first(EventTiming::new(None, Some(5))))
        });
        let outputs = run(&records, &mut policy).unwrap();
        drop(policy);

        assert_eq!(seen, Some(EventTiming::undefined()));
        assert_eq!(outputs[0][1].data, " 0,,0:00:00.05,text");
    }

    #[test]
    fn format_must_come_first() {
        let records = events(&[("Dialogue", " 0,0:00:01.00,0:00:02.00,Hi")]);
        let err = run(&records, &mut passthrough()).unwrap_err();
        assert_eq!(
            err,
            CoreError::Format("format line must appear first in events".to_string())
        );
    }

    #[test]
    fn text_must_be_last() {
        let records = events(&[("Format", " Start, Text, End")]);
        let err = run(&records, &mut passthrough()).unwrap_err();
        assert_eq!(
            err,
            CoreError::Format("'Text' field must appear in last place".to_string())
        );

        let records = events(&[("Format", " Start, End")]);
        assert!(run(&records, &mut passthrough()).is_err());
    }

    #[test]
    fn start_and_end_are_required() {
        let records = events(&[("Format", " Layer, End, Text")]);
        let err = run(&records, &mut passthrough()).unwrap_err();
        assert!(err.to_string().contains("'Start' field not found"));

        let records = events(&[("Format", " Layer, Start, Text")]);
        let err = run(&records, &mut passthrough()).unwrap_err();
        assert!(err.to_string().contains("'End' field not found"));
    }

    #[test]
    fn short_event_is_a_format_error() {
        let records = events(&[
            ("Format", " Layer, Start, End, Text"),
            ("Dialogue", " 0,0:00:01.00"),
        ]);
        let err = run(&records, &mut passthrough()).unwrap_err();
        assert!(matches!(err, CoreError::Format(ref msg) if msg.contains("'End'")));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let records = events(&[
            ("Format", " Layer, Start, End, Text"),
            ("Dialogue", " 0,00:00:01.00,0:00:02.00,Hi"),
        ]);
        let err = run(&records, &mut passthrough()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTime(_)));
    }

    #[test]
    fn negative_output_is_a_value_error() {
        let records = events(&[
            ("Format", " Layer, Start, End, Text"),
            ("Dialogue", " 0,0:00:01.00,0:00:02.00,Hi"),
        ]);
        let mut policy = PolicyFn::new(1, |_: &EventContext<'_>, _: EventTiming, _: &mut Diagnostics| {
            Ok(Routing::first(EventTiming::new(Some(-1), None)))
        });
        let err = run(&records, &mut policy).unwrap_err();
        assert!(matches!(err, CoreError::Value(_)));
    }

    #[test]
    fn routing_beyond_outputs_is_internal() {
        let records = events(&[
            ("Format", " Layer, Start, End, Text"),
            ("Dialogue", " 0,0:00:01.00,0:00:02.00,Hi"),
        ]);
        let mut policy = PolicyFn::new(1, |_: &EventContext<'_>, timing, _: &mut Diagnostics| {
            Ok(Routing::second(timing))
        });
        let err = run(&records, &mut policy).unwrap_err();
        assert!(err.is_internal_bug());

        let mut none = PolicyFn::new(0, |_: &EventContext<'_>, timing, _: &mut Diagnostics| {
            Ok(Routing::first(timing))
        });
        assert!(run(&records, &mut none).unwrap_err().is_internal_bug());
    }

    #[test]
    fn format_only_section_is_copied_to_every_output() {
        let records = events(&[("Format", " Start, End, Text")]);
        let mut policy = PolicyFn::new(2, |_: &EventContext<'_>, _: EventTiming, _: &mut Diagnostics| {
            Ok(Routing::Drop)
        });
        let outputs = run(&records, &mut policy).unwrap();
        assert_eq!(outputs, vec![records.clone(), records]);
    }

    #[test]
    fn document_without_events_warns() {
        let mut document = Document::new(false);
        document.add_line(SectionKind::ScriptInfo, "Title", " none");
        document.add_line(SectionKind::Styles, "Format", " Name, Fontname");

        let config = FormatConfig::standard();
        let outcome = EventRewriter::new(&config)
            .rewrite(&document, &mut passthrough())
            .unwrap();

        assert_eq!(outcome.documents, vec![document]);
        assert!(outcome.diagnostics.contains(DiagnosticKind::MissingEvents));
    }

    #[test]
    fn other_sections_keep_membership_order() {
        let mut document = Document::new(true);
        document.add_line(SectionKind::Events, "Format", " Start, End, Text");
        document.add_line(SectionKind::ScriptInfo, "Title", " order");
        document.add_line(SectionKind::Fonts, "fontname", " a.ttf");

        let config = FormatConfig::standard();
        let outcome = EventRewriter::new(&config)
            .rewrite(&document, &mut passthrough())
            .unwrap();

        let sections: Vec<_> = outcome.documents[0].sections().collect();
        assert_eq!(
            sections,
            vec![SectionKind::Events, SectionKind::ScriptInfo, SectionKind::Fonts]
        );
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn trim_span_excludes_blanks() {
        let data = "a, 0:00:01.00 ,b";
        assert_eq!(&data[trim_span(data, 2..14)], "0:00:01.00");
        assert!(trim_span("a,  ,b", 2..4).is_empty());
    }
}

//! Soft diagnostics reported while parsing and rewriting
//!
//! Conditions that do not abort processing (a script without an Events
//! section, a split that truncates an event, a line dropped after a
//! multi-line field) are collected as [`Diagnostic`] values. Every diagnostic
//! pushed into a [`Diagnostics`] collector is also forwarded to the `log`
//! facade so command-line front ends see it without extra plumbing.

use core::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Information that may be useful but doesn't affect the output
    Info,

    /// Output was produced but may not be what the user expects
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// What a diagnostic is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The document has no Events section, nothing was rewritten
    MissingEvents,

    /// An event starts before a split point and ends after it
    LossySplit,

    /// A line terminating a multi-line field was dropped
    DiscardedContinuationLine,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEvents => write!(f, "missing-events"),
            Self::LossySplit => write!(f, "lossy-split"),
            Self::DiscardedContinuationLine => write!(f, "discarded-line"),
        }
    }
}

/// A soft condition found while processing a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,

    /// Diagnostic kind for filtering
    pub kind: DiagnosticKind,

    /// Human-readable message
    pub message: String,

    /// Physical input line (1-based), when known
    pub line: Option<usize>,

    /// Index of the record within its section, when known
    pub record: Option<usize>,
}

impl Diagnostic {
    /// Create new diagnostic without location
    #[must_use]
    pub const fn new(severity: Severity, kind: DiagnosticKind, message: String) -> Self {
        Self {
            severity,
            kind,
            message,
            line: None,
            record: None,
        }
    }

    /// Create info-level diagnostic
    #[must_use]
    pub const fn info(kind: DiagnosticKind, message: String) -> Self {
        Self::new(Severity::Info, kind, message)
    }

    /// Create warning-level diagnostic
    #[must_use]
    pub const fn warning(kind: DiagnosticKind, message: String) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    /// Attach a physical line number
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a record index
    #[must_use]
    pub fn at_record(mut self, record: usize) -> Self {
        self.record = Some(record);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        if let Some(record) = self.record {
            write!(f, " (record {record})")?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Collected diagnostics in report order
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a diagnostic and forward it to the logger
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Info => log::info!("{diagnostic}"),
            Severity::Warning => log::warn!("{diagnostic}"),
        }
        self.items.push(diagnostic);
    }

    /// Append diagnostics collected elsewhere without logging them again
    pub fn append(&mut self, other: Self) {
        self.items.extend(other.items);
    }

    /// Iterate over collected diagnostics
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Number of collected diagnostics
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check whether nothing was reported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count diagnostics of one kind
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    /// Check whether any diagnostic of `kind` was reported
    #[must_use]
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.items.iter().any(|d| d.kind == kind)
    }

    /// Consume the collector
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

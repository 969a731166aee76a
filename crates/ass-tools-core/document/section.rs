//! Section identifiers and line-break styles
//!
//! A script is a sequence of bracketed sections. Only five are recognised;
//! their output order is fixed regardless of the order they were read in.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recognised section of a script
///
/// # Examples
///
/// ```rust
/// use ass_tools_core::SectionKind;
///
/// assert_eq!(SectionKind::from_header("[V4+ Styles]"), Some(SectionKind::Styles));
/// assert_eq!(SectionKind::Events.header(), "[Events]");
/// assert_eq!(SectionKind::from_header("[Aegisub Project Garbage]"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SectionKind {
    /// `[Script Info]` metadata section, always first
    ScriptInfo,
    /// `[V4+ Styles]` style definitions
    Styles,
    /// `[Fonts]` embedded font payloads
    Fonts,
    /// `[Graphics]` embedded image payloads
    Graphics,
    /// `[Events]` timed dialogue and commands
    Events,
}

impl SectionKind {
    /// Output order of sections
    pub const CANONICAL_ORDER: [Self; 5] = [
        Self::ScriptInfo,
        Self::Styles,
        Self::Fonts,
        Self::Graphics,
        Self::Events,
    ];

    /// Literal header line of this section
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::ScriptInfo => "[Script Info]",
            Self::Styles => "[V4+ Styles]",
            Self::Fonts => "[Fonts]",
            Self::Graphics => "[Graphics]",
            Self::Events => "[Events]",
        }
    }

    /// Match a trimmed header line exactly
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        Self::CANONICAL_ORDER
            .into_iter()
            .find(|kind| kind.header() == header)
    }

    /// Check whether a trimmed line is a bracketed header of any name
    #[must_use]
    pub fn is_header_line(trimmed: &str) -> bool {
        trimmed.starts_with('[') && trimmed.ends_with(']')
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Line-break sequence of a document
///
/// Detected from the first line on input and reused verbatim on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LineBreak {
    /// Unix `\n`
    #[default]
    Lf,
    /// Windows `\r\n`
    CrLf,
}

impl LineBreak {
    /// The break sequence
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Detect the style from a raw first line (without its `\n`)
    #[must_use]
    pub fn detect(first_line: &str) -> Self {
        if first_line.ends_with('\r') {
            Self::CrLf
        } else {
            Self::Lf
        }
    }
}

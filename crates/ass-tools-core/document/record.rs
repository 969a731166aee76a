//! Records and event kinds
//!
//! Every data line of a section is a `type:data` record. The type is trimmed;
//! the data is kept byte for byte so serialization reproduces the input.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `type:data` pair within a section
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Record {
    /// Text before the first record delimiter, trimmed
    pub record_type: String,
    /// Everything after the first record delimiter, untrimmed
    pub data: String,
}

impl Record {
    /// Create a record from its parts
    pub fn new(record_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            data: data.into(),
        }
    }

    /// Event kind of this record, if its type names one
    #[must_use]
    pub fn event_kind(&self) -> Option<EventKind> {
        EventKind::from_record_type(&self.record_type)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.record_type, self.data)
    }
}

/// Record types recognised in the Events section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventKind {
    /// Command event, carries no duration
    Command,
    /// Commented-out event
    Comment,
    /// Displayed dialogue
    Dialogue,
    /// Movie event
    Movie,
    /// Picture event
    Picture,
    /// Sound event, carries no duration
    Sound,
}

impl EventKind {
    /// Match a record type exactly
    #[must_use]
    pub fn from_record_type(record_type: &str) -> Option<Self> {
        match record_type {
            "Command" => Some(Self::Command),
            "Comment" => Some(Self::Comment),
            "Dialogue" => Some(Self::Dialogue),
            "Movie" => Some(Self::Movie),
            "Picture" => Some(Self::Picture),
            "Sound" => Some(Self::Sound),
            _ => None,
        }
    }

    /// Record type literal
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "Command",
            Self::Comment => "Comment",
            Self::Dialogue => "Dialogue",
            Self::Movie => "Movie",
            Self::Picture => "Picture",
            Self::Sound => "Sound",
        }
    }

    /// Whether the End field of this kind is meaningful
    #[must_use]
    pub const fn has_duration(self) -> bool {
        !matches!(self, Self::Command | Self::Sound)
    }
}

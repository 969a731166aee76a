//! # ASS Tools Core
//!
//! Byte-faithful reading, rewriting and writing of ASS (Advanced `SubStation`
//! Alpha) subtitle scripts. Unlike a full ASS parser this crate keeps every
//! record as raw `type:data` text and only decodes what a transform touches,
//! so untouched fields, spacing and line breaks survive a round trip.
//!
//! ## Modules
//!
//! - [`document`]: document model, parser and serializer
//! - [`timestamp`]: `H:MM:SS.CC` codec and seconds conversion
//! - [`locator`]: field lookups driven by `Format` declarations
//! - [`rewrite`]: event rewrite engine and the [`TimingPolicy`] seam
//! - [`policies`]: split-at-cut and affine time shift
//!
//! ## Quick Start
//!
//! ```rust
//! use ass_tools_core::{policies::split_document, Document, SectionKind};
//!
//! let script_text = "[Script Info]\n\
//! Title: Example\n\
//! \n\
//! [Events]\n\
//! Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
//! Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,Before the cut\n\
//! Dialogue: 0,0:00:12.00,0:00:15.00,Default,,0,0,0,,After the cut\n";
//!
//! let document = Document::parse(script_text)?;
//! let outcome = split_document(&document, 1000)?;
//!
//! let second = outcome.documents[1].section(SectionKind::Events).unwrap();
//! assert_eq!(second[1].data, " 0,0:00:02.00,0:00:05.00,Default,,0,0,0,,After the cut");
//! # Ok::<(), ass_tools_core::CoreError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod locator;
pub mod policies;
pub mod rewrite;
pub mod timestamp;
pub mod utils;

pub use config::FormatConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use document::{
    ContinuationAction, Document, EventKind, LineBreak, Parser, Record, SectionKind, Serializer,
};
pub use locator::FieldLocator;
pub use policies::{shift_document, split_document, AffineShift, SplitAtCut};
pub use rewrite::{
    EventContext, EventRewriter, EventTiming, PolicyFn, RewriteOutcome, Routing, Targets,
    TimingPolicy,
};
pub use utils::{CoreError, ErrorKind};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified `CoreError`
pub type Result<T> = core::result::Result<T, CoreError>;

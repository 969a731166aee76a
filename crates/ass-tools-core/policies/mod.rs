//! Ready-made timing policies
//!
//! - [`SplitAtCut`] splits a script in two at a cut time
//! - [`AffineShift`] maps every timestamp through `t * scale + offset`
//!
//! [`split_document`] and [`shift_document`] run them with the standard
//! format table.

mod shift;
mod split;

pub use shift::AffineShift;
pub use split::SplitAtCut;

use crate::{
    rewrite::{EventRewriter, RewriteOutcome},
    timestamp::{Centiseconds, SignedCentiseconds},
    Document, FormatConfig, Result,
};

/// Split `document` at `cut` centiseconds
///
/// The outcome holds two documents: events starting before the cut, then
/// events starting at or after it with times moved back by `cut`.
///
/// # Errors
///
/// Returns any error from [`EventRewriter::rewrite`].
pub fn split_document(document: &Document, cut: Centiseconds) -> Result<RewriteOutcome> {
    let config = FormatConfig::standard();
    EventRewriter::new(&config).rewrite(document, &mut SplitAtCut::new(cut))
}

/// Apply `t * scale + offset` to every event of `document`
///
/// # Errors
///
/// Returns [`crate::CoreError::Value`] for an invalid scale or when a
/// resulting timestamp is negative, plus any error from
/// [`EventRewriter::rewrite`].
pub fn shift_document(
    document: &Document,
    offset: SignedCentiseconds,
    scale: f64,
) -> Result<RewriteOutcome> {
    let config = FormatConfig::standard();
    let mut policy = AffineShift::new(offset, scale)?;
    EventRewriter::new(&config).rewrite(document, &mut policy)
}

use crate::{
    diagnostics::Diagnostics,
    rewrite::{EventContext, EventTiming, Routing, TimingPolicy},
    timestamp::{seconds_to_centiseconds_signed, SignedCentiseconds},
    utils::CoreError,
    Result,
};

/// Single-output policy applying `t * scale + offset` to every timestamp
///
/// Products are rounded to the nearest centisecond. A negative result for
/// any event aborts the rewrite. Events without a Start are copied
/// unchanged with End cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineShift {
    /// Added after scaling, in centiseconds
    offset: SignedCentiseconds,
    /// Multiplier applied first
    scale: f64,
}

impl AffineShift {
    /// Create a shift from an offset in centiseconds and a scale factor
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Value`] unless `scale` is a normal, positive
    /// number.
    pub fn new(offset: SignedCentiseconds, scale: f64) -> Result<Self> {
        if !scale.is_normal() || scale < 0.0 {
            return Err(CoreError::value(format!("invalid scale '{scale}'")));
        }
        Ok(Self { offset, scale })
    }

    /// Create a shift from an offset in seconds
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Value`] for a non-finite offset or an invalid
    /// scale.
    pub fn from_seconds(offset: f64, scale: f64) -> Result<Self> {
        Self::new(seconds_to_centiseconds_signed(offset)?, scale)
    }

    /// Pure offset with unit scale
    #[must_use]
    pub const fn offset_only(offset: SignedCentiseconds) -> Self {
        Self { offset, scale: 1.0 }
    }

    /// Offset in centiseconds
    #[must_use]
    pub const fn offset(&self) -> SignedCentiseconds {
        self.offset
    }

    /// Scale factor
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Map one timestamp
    #[must_use]
    pub fn apply(&self, value: SignedCentiseconds) -> SignedCentiseconds {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let scaled = (value as f64 * self.scale).round() as SignedCentiseconds;
        scaled.saturating_add(self.offset)
    }
}

impl TimingPolicy for AffineShift {
    fn name(&self) -> &'static str {
        "shift"
    }

    fn output_count(&self) -> usize {
        1
    }

    fn decide(
        &mut self,
        event: &EventContext<'_>,
        timing: EventTiming,
        _diagnostics: &mut Diagnostics,
    ) -> Result<Routing> {
        let Some(start) = timing.start else {
            return Ok(Routing::first(EventTiming::undefined()));
        };

        let start = self.apply(start);
        let end = timing.end.map(|end| self.apply(end));
        if start < 0 || end.is_some_and(|end| end < 0) {
            return Err(CoreError::value(format!(
                "Transformation yields negative timestamps (record {})",
                event.index
            )));
        }
        Ok(Routing::first(EventTiming::new(Some(start), end)))
    }
}

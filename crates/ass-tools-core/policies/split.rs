use crate::{
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
    rewrite::{EventContext, EventTiming, Routing, Targets, TimingPolicy},
    timestamp::{seconds_to_centiseconds, Centiseconds, SignedCentiseconds},
    utils::CoreError,
    Result,
};

/// Two-output policy cutting a script at a fixed time
///
/// Events that start before the cut go unchanged to the first output.
/// Events that start at or after it go to the second output, moved back by
/// the cut. An End earlier than the cut becomes `0:00:00.00` there. Events
/// without a Start are copied unchanged to both outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitAtCut {
    /// Cut time
    cut: SignedCentiseconds,
}

impl SplitAtCut {
    /// Cut at `cut` centiseconds
    #[must_use]
    pub fn new(cut: Centiseconds) -> Self {
        Self {
            cut: SignedCentiseconds::from(cut),
        }
    }

    /// Cut at `seconds`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Value`] unless `seconds` is a normal, positive
    /// number that fits the centisecond range.
    pub fn from_seconds(seconds: f64) -> Result<Self> {
        if !seconds.is_normal() || seconds < 0.0 {
            return Err(CoreError::value(format!("invalid split time '{seconds}'")));
        }
        Ok(Self::new(seconds_to_centiseconds(seconds)?))
    }

    /// Cut time in centiseconds
    #[must_use]
    pub const fn cut(&self) -> SignedCentiseconds {
        self.cut
    }
}

impl TimingPolicy for SplitAtCut {
    fn name(&self) -> &'static str {
        "split"
    }

    fn output_count(&self) -> usize {
        2
    }

    fn decide(
        &mut self,
        event: &EventContext<'_>,
        timing: EventTiming,
        diagnostics: &mut Diagnostics,
    ) -> Result<Routing> {
        let Some(start) = timing.start else {
            return Ok(Routing::To(Targets::all(), EventTiming::undefined()));
        };

        if start >= self.cut {
            let end = timing
                .end
                .map(|end| if end >= self.cut { end - self.cut } else { 0 });
            return Ok(Routing::second(EventTiming::new(Some(start - self.cut), end)));
        }

        if timing.end.is_some_and(|end| end > self.cut) {
            diagnostics.push(
                Diagnostic::warning(
                    DiagnosticKind::LossySplit,
                    format!(
                        "{} event crosses the cut and keeps its original end",
                        event.record_type
                    ),
                )
                .at_record(event.index),
            );
        }
        Ok(Routing::first(timing))
    }
}

//! Per-event timing policies and routing decisions
//!
//! The rewrite engine decodes the Start/End values of every event and hands
//! them to a [`TimingPolicy`]. The policy answers with a [`Routing`] saying
//! which output documents receive the event and with which timing.

use crate::{diagnostics::Diagnostics, timestamp::SignedCentiseconds, EventKind, Result};

bitflags::bitflags! {
    /// Output documents an event is routed to
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Targets: u8 {
        /// First output document
        const FIRST = 1 << 0;
        /// Second output document
        const SECOND = 1 << 1;
    }
}

impl Targets {
    /// Largest number of outputs a policy may declare
    pub const MAX_OUTPUTS: usize = 2;

    /// Targets covering the first `count` outputs
    #[must_use]
    pub fn first_n(count: usize) -> Self {
        match count {
            0 => Self::empty(),
            1 => Self::FIRST,
            _ => Self::all(),
        }
    }

    /// Target flag for output `index`, if it exists
    #[must_use]
    pub const fn output(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::FIRST),
            1 => Some(Self::SECOND),
            _ => None,
        }
    }
}

/// Decoded Start/End values of one event
///
/// `None` marks an undefined (empty) field, which is written back empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTiming {
    /// Start time in centiseconds
    pub start: Option<SignedCentiseconds>,
    /// End time in centiseconds
    pub end: Option<SignedCentiseconds>,
}

impl EventTiming {
    /// Timing with both fields set as given
    #[must_use]
    pub const fn new(start: Option<SignedCentiseconds>, end: Option<SignedCentiseconds>) -> Self {
        Self { start, end }
    }

    /// Timing with both fields undefined
    #[must_use]
    pub const fn undefined() -> Self {
        Self {
            start: None,
            end: None,
        }
    }
}

/// Where an event goes and how it is timed there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routing {
    /// Event is not emitted anywhere
    Drop,
    /// Same timing written to every flagged output
    To(Targets, EventTiming),
    /// Independent timing per output of a two-output policy
    Each {
        /// Timing for the first output, `None` to skip it
        first: Option<EventTiming>,
        /// Timing for the second output, `None` to skip it
        second: Option<EventTiming>,
    },
}

impl Routing {
    /// Route only to the first output
    #[must_use]
    pub const fn first(timing: EventTiming) -> Self {
        Self::To(Targets::FIRST, timing)
    }

    /// Route only to the second output
    #[must_use]
    pub const fn second(timing: EventTiming) -> Self {
        Self::To(Targets::SECOND, timing)
    }

    /// Every output that receives the event
    #[must_use]
    pub fn targets(&self) -> Targets {
        match self {
            Self::Drop => Targets::empty(),
            Self::To(targets, _) => *targets,
            Self::Each { first, second } => {
                let mut targets = Targets::empty();
                targets.set(Targets::FIRST, first.is_some());
                targets.set(Targets::SECOND, second.is_some());
                targets
            }
        }
    }

    /// Timing written to output `index`, `None` if it is not targeted
    #[must_use]
    pub fn timing_for(&self, index: usize) -> Option<EventTiming> {
        match (self, index) {
            (Self::To(targets, timing), _) => {
                Targets::output(index).filter(|flag| targets.contains(*flag))?;
                Some(*timing)
            }
            (Self::Each { first, .. }, 0) => *first,
            (Self::Each { second, .. }, 1) => *second,
            _ => None,
        }
    }
}

/// The event being decided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext<'a> {
    /// Position in the Events section, the Format record being 0
    pub index: usize,
    /// Record type as written (`Dialogue`, `Comment`, ...)
    pub record_type: &'a str,
    /// Recognised event kind, if any
    pub kind: Option<EventKind>,
}

/// Strategy deciding the new timing and destination of each event
///
/// Implementors see events in section order. Soft conditions go into
/// `diagnostics`; returning an error aborts the whole rewrite before any
/// output is produced.
pub trait TimingPolicy {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Number of output documents, between 1 and [`Targets::MAX_OUTPUTS`]
    fn output_count(&self) -> usize;

    /// Decide the routing for one event
    ///
    /// # Errors
    ///
    /// Any error aborts the rewrite.
    fn decide(
        &mut self,
        event: &EventContext<'_>,
        timing: EventTiming,
        diagnostics: &mut Diagnostics,
    ) -> Result<Routing>;
}

/// Closure-backed policy
///
/// ```rust
/// use ass_tools_core::rewrite::{EventTiming, PolicyFn, Routing, TimingPolicy};
///
/// let mut drop_comments = PolicyFn::new(1, |event, timing, _| {
///     Ok(if event.record_type == "Comment" {
///         Routing::Drop
///     } else {
///         Routing::first(timing)
///     })
/// });
/// assert_eq!(drop_comments.output_count(), 1);
/// ```
pub struct PolicyFn<F> {
    /// Declared output count
    outputs: usize,
    /// Decision closure
    decide: F,
}

impl<F> PolicyFn<F>
where
    F: FnMut(&EventContext<'_>, EventTiming, &mut Diagnostics) -> Result<Routing>,
{
    /// Wrap `decide` as a policy with `outputs` outputs
    pub const fn new(outputs: usize, decide: F) -> Self {
        Self { outputs, decide }
    }
}

impl<F> TimingPolicy for PolicyFn<F>
where
    F: FnMut(&EventContext<'_>, EventTiming, &mut Diagnostics) -> Result<Routing>,
{
    fn name(&self) -> &'static str {
        "closure"
    }

    fn output_count(&self) -> usize {
        self.outputs
    }

    fn decide(
        &mut self,
        event: &EventContext<'_>,
        timing: EventTiming,
        diagnostics: &mut Diagnostics,
    ) -> Result<Routing> {
        (self.decide)(event, timing, diagnostics)
    }
}

impl<F> core::fmt::Debug for PolicyFn<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PolicyFn")
            .field("outputs", &self.outputs)
            .finish_non_exhaustive()
    }
}

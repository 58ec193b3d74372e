//! Trace event types and the append-only event log.

use std::num::NonZeroI8;
use std::time::{Duration, Instant};

use crate::error::{RecorderError, RecorderResult};

/// Identifier of an instrumented region.
pub type RegionId = u16;

/// Marks an event as opening or closing a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Region entry, carrying the call site's tag
    Begin(NonZeroI8),
    /// Region exit
    End,
}

impl Phase {
    /// Create a begin phase from a raw tag.
    ///
    /// The zero tag is reserved for end events, so it is rejected here.
    pub fn begin(tag: i8) -> RecorderResult<Self> {
        NonZeroI8::new(tag)
            .map(Phase::Begin)
            .ok_or(RecorderError::InvalidTag)
    }

    /// Check whether this phase opens a region.
    pub fn is_begin(&self) -> bool {
        matches!(self, Phase::Begin(_))
    }

    /// Check whether this phase closes a region.
    pub fn is_end(&self) -> bool {
        matches!(self, Phase::End)
    }
}

/// A single recorded begin or end event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Region this event belongs to
    pub region: RegionId,
    /// Whether the region is being opened or closed
    pub phase: Phase,
    /// Monotonic timestamp taken when the event was recorded
    pub at: Instant,
}

/// Append-only, insertion-ordered log of recorded events.
///
/// Events are stamped with a monotonic clock as they are recorded, so
/// timestamps are non-decreasing in log order. Pairing validation is
/// deferred to aggregation; recording itself is a single `Vec` push.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create an empty event log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty log with room for `capacity` events.
    ///
    /// Pre-reserving keeps the append path free of reallocation for call
    /// sites that know their event volume up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// Record an event stamped with the current monotonic time.
    pub fn record(&mut self, region: RegionId, phase: Phase) {
        self.record_at(region, phase, Instant::now());
    }

    /// Record an event with an explicit timestamp.
    ///
    /// Timestamps must not decrease between consecutive calls; aggregation
    /// relies on the log being in recording order.
    pub fn record_at(&mut self, region: RegionId, phase: Phase, at: Instant) {
        self.events.push(Event { region, phase, at });

        tracing::trace!(
            target: "recorder::events",
            region = region,
            begin = phase.is_begin(),
            "event recorded"
        );
    }

    /// Get the recorded events in recording order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Elapsed time between the first and last recorded event.
    pub fn time_span(&self) -> RecorderResult<Duration> {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) if self.events.len() >= 2 => {
                Ok(last.at.saturating_duration_since(first.at))
            }
            _ => Err(RecorderError::EmptyLog),
        }
    }
}

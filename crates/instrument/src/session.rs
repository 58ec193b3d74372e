//! Recording session lifecycle and the call-site recorder API.

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use recorder::{aggregate, EventLog, Phase, ProfileSummary, RegionId};

use crate::error::InstrumentResult;
use crate::scope::RegionGuard;

/// A single recording lifetime bound to a report destination.
///
/// The session owns the event log for its lifetime and produces exactly
/// one report when finished. [`finish`](Self::finish) consumes the session,
/// so a finished session can neither record further events nor be finished
/// twice.
///
/// Recording goes through a shared reference so that nested
/// [`RegionGuard`]s can close their regions on every exit path. The
/// interior `RefCell` makes the session `!Sync`; all recording must stay
/// on one thread, and callers needing concurrent instrumentation shard by
/// thread and merge logs before aggregation.
#[derive(Debug)]
pub struct RecordingSession {
    session_id: String,
    started_at: DateTime<Utc>,
    destination: PathBuf,
    events: RefCell<EventLog>,
}

impl RecordingSession {
    /// Start a session that will write its report to `destination`.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self::with_capacity(destination, 0)
    }

    /// Start a session with the event log pre-sized for `capacity` events.
    ///
    /// Pre-sizing keeps the begin/end hot path free of reallocation.
    pub fn with_capacity(destination: impl Into<PathBuf>, capacity: usize) -> Self {
        let session = Self {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            destination: destination.into(),
            events: RefCell::new(EventLog::with_capacity(capacity)),
        };

        tracing::debug!(
            target: "instrument::session",
            session_id = %session.session_id,
            path = %session.destination.display(),
            "recording session started"
        );

        session
    }

    /// Record the entry of a region.
    ///
    /// The tag distinguishes begin events from end events in the recorded
    /// stream and must be non-zero; zero is rejected.
    pub fn begin_region(&self, region: RegionId, tag: i8) -> InstrumentResult<()> {
        let phase = Phase::begin(tag)?;
        self.events.borrow_mut().record(region, phase);
        Ok(())
    }

    /// Record the exit of a region.
    pub fn end_region(&self, region: RegionId) {
        self.events.borrow_mut().record(region, Phase::End);
    }

    /// Record the entry of a region and return a guard that records the
    /// matching exit when dropped.
    pub fn enter(&self, region: RegionId, tag: i8) -> InstrumentResult<RegionGuard<'_>> {
        self.begin_region(region, tag)?;
        Ok(RegionGuard::new(self, region))
    }

    /// Unique identifier of this session.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// When this session started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Report destination this session is bound to.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Number of events recorded so far.
    pub fn events_recorded(&self) -> usize {
        self.events.borrow().len()
    }

    /// Aggregate the log and write the report to the bound destination.
    ///
    /// Consumes the session and releases the event log. Structural
    /// violations in the trace (unpaired or unclosed events, a log too
    /// short to span any time) surface here rather than being recovered.
    pub fn finish(self) -> InstrumentResult<ProfileSummary> {
        let destination = self.destination.clone();
        let summary = self.summarize()?;

        // The destination is only touched once the trace is known to be
        // well formed; a malformed trace leaves no partial report behind.
        let file = File::create(&destination)?;
        let mut out = BufWriter::new(file);
        summary.write_to(&mut out)?;
        out.flush()?;

        tracing::debug!(
            target: "instrument::session",
            path = %destination.display(),
            regions = summary.regions.len(),
            "report written"
        );

        Ok(summary)
    }

    /// Aggregate the log and write the report to a caller-supplied stream
    /// instead of the bound destination.
    pub fn finish_into<W: Write>(self, out: &mut W) -> InstrumentResult<ProfileSummary> {
        let summary = self.summarize()?;
        summary.write_to(out)?;
        Ok(summary)
    }

    fn summarize(self) -> InstrumentResult<ProfileSummary> {
        let log = self.events.into_inner();
        let span = log.time_span()?;
        let stats = aggregate(&log)?;
        Ok(ProfileSummary::from_stats(&stats, span)?)
    }
}

//! Error types for the recording engine.

use thiserror::Error;

use crate::event::RegionId;

/// Errors that can occur while recording, aggregating, or reporting a trace.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// A begin event was requested with the zero tag
    #[error("begin events require a non-zero tag")]
    InvalidTag,

    /// An end event did not pair with the innermost open begin
    #[error("end event for region {found} does not match the innermost open begin")]
    UnpairedEvent {
        /// Region of the innermost open begin, if any begin was open at all
        expected: Option<RegionId>,
        /// Region named by the offending end event
        found: RegionId,
    },

    /// The log ended with begin events still open
    #[error("region {region} was never closed")]
    UnclosedEvent {
        /// Innermost region still open when the log ended
        region: RegionId,
    },

    /// The log holds too few events to span any time
    #[error("event log holds fewer than two events")]
    EmptyLog,

    /// The log spans zero time, so percentages are undefined
    #[error("log spans zero time, percentages are undefined")]
    DegenerateTimeSpan,

    /// Failed to write the report
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recorder operations.
pub type RecorderResult<T> = Result<T, RecorderError>;

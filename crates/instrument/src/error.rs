//! Error types for the instrumentation surface.

use thiserror::Error;

/// Errors that can occur while recording or finishing a session.
#[derive(Debug, Error)]
pub enum InstrumentError {
    /// The recording engine rejected the trace
    #[error(transparent)]
    Recorder(#[from] recorder::RecorderError),

    /// Failed to write the report to its destination
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for instrumentation operations.
pub type InstrumentResult<T> = Result<T, InstrumentError>;

//! Scoped region instrumentation.

use recorder::RegionId;

use crate::session::RecordingSession;

/// RAII guard that closes its region when dropped.
///
/// Created by [`RecordingSession::enter`], which records the begin event.
/// The matching end event is recorded on every exit path out of the
/// guard's scope, including early returns and unwinding panics.
#[derive(Debug)]
pub struct RegionGuard<'a> {
    session: &'a RecordingSession,
    region: RegionId,
}

impl<'a> RegionGuard<'a> {
    pub(crate) fn new(session: &'a RecordingSession, region: RegionId) -> Self {
        Self { session, region }
    }

    /// Region this guard closes.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Close the region now instead of at the end of the scope.
    pub fn end(self) {}
}

impl Drop for RegionGuard<'_> {
    fn drop(&mut self) {
        self.session.end_region(self.region);
    }
}

/// Macro for one-line scope instrumentation.
///
/// Records a begin event now and the matching end event when the
/// surrounding scope exits. The begin result is propagated with `?`, so
/// the macro must be used inside a function returning a compatible
/// `Result`. The tag defaults to `1` when omitted.
///
/// # Example
///
/// ```rust
/// use instrument::{time_region, InstrumentResult, RecordingSession};
///
/// fn save(session: &RecordingSession) -> InstrumentResult<()> {
///     time_region!(session, 3);
///     std::thread::sleep(std::time::Duration::from_millis(1));
///     Ok(())
/// } // end event recorded here
///
/// let session = RecordingSession::new("unused.txt");
/// save(&session)?;
/// assert_eq!(session.events_recorded(), 2);
/// # Ok::<(), instrument::InstrumentError>(())
/// ```
#[macro_export]
macro_rules! time_region {
    ($session:expr, $region:expr) => {
        let _guard = $session.enter($region, 1)?;
    };
    ($session:expr, $region:expr, $tag:expr) => {
        let _guard = $session.enter($region, $tag)?;
    };
}

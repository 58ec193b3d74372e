//! Call-Site Instrumentation
//!
//! This crate is the surface that instrumented code talks to. It layers a
//! session lifecycle and scoped-region ergonomics over the `recorder`
//! engine:
//!
//! - [`RecordingSession`] - an explicit session object bound to a report
//!   destination; owns the event log and produces exactly one report when
//!   finished
//! - [`RegionGuard`] / [`time_region!`] - RAII instrumentation that closes
//!   a region on every exit path, including early return and unwind
//!
//! Finishing consumes the session, so recording after finalize or
//! finalizing twice is a compile error rather than a runtime one.
//! Sessions are single-threaded by design; the session type is `!Sync`.
//!
//! # Example
//!
//! ```rust
//! use instrument::RecordingSession;
//! use std::time::Duration;
//!
//! let report = std::env::temp_dir().join("instrument_doc_example.txt");
//! let session = RecordingSession::new(&report);
//!
//! {
//!     let _load = session.enter(1, 1)?;
//!     std::thread::sleep(Duration::from_millis(2));
//!     let _parse = session.enter(2, 1)?;
//!     std::thread::sleep(Duration::from_millis(1));
//! }
//!
//! let summary = session.finish()?;
//! assert_eq!(summary.regions.len(), 2);
//! # std::fs::remove_file(report).ok();
//! # Ok::<(), instrument::InstrumentError>(())
//! ```

mod error;
mod scope;
mod session;

pub use error::{InstrumentError, InstrumentResult};
pub use scope::RegionGuard;
pub use session::RecordingSession;

//! Region Recording Engine
//!
//! This crate provides the core engine for in-process region tracing:
//!
//! - An append-only event log of begin/end events with monotonic timestamps
//! - Stack-based pairing of end events against the innermost open begin,
//!   accumulated into per-region counts and total durations
//! - A deterministic, region-sorted text report with each region's share
//!   of the log's overall time span, plus a JSON summary export
//!
//! Recording, aggregation, and rendering form a strict pipeline: call sites
//! append events while the program runs, then the log is aggregated once
//! and rendered once. Malformed traces (an end that does not match the
//! innermost open begin, a begin that is never closed) are surfaced as
//! errors at aggregation time rather than silently tolerated.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use recorder::{aggregate, render_to_string, EventLog, Phase};
//!
//! let start = Instant::now();
//! let mut log = EventLog::new();
//! log.record_at(7, Phase::begin(1)?, start);
//! log.record_at(7, Phase::End, start + Duration::from_micros(40));
//!
//! let stats = aggregate(&log)?;
//! let report = render_to_string(&stats, log.time_span()?)?;
//! assert_eq!(report, "# 7 1 40 100\n");
//! # Ok::<(), recorder::RecorderError>(())
//! ```
//!
//! # Modules
//!
//! - `event` - Event types and the append-only log
//! - `stats` - Begin/end pairing and accumulation
//! - `report` - Text and JSON report rendering
//! - `error` - Error types

mod error;
mod event;
mod report;
mod stats;

pub use error::{RecorderError, RecorderResult};
pub use event::{Event, EventLog, Phase, RegionId};
pub use report::{render, render_to_string, ProfileSummary, RegionLine};
pub use stats::{aggregate, RegionStats, StatTable};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_known_trace_end_to_end() {
        // Region 1 covers the first 10µs of a 40µs log, region 2 the
        // remaining 30µs.
        let start = Instant::now();
        let mut log = EventLog::new();
        log.record_at(1, Phase::begin(1).unwrap(), start);
        log.record_at(1, Phase::End, start + Duration::from_micros(10));
        log.record_at(2, Phase::begin(1).unwrap(), start + Duration::from_micros(10));
        log.record_at(2, Phase::End, start + Duration::from_micros(40));

        let stats = aggregate(&log).unwrap();
        let report = render_to_string(&stats, log.time_span().unwrap()).unwrap();

        assert_eq!(report, "# 1 1 10 25\n# 2 1 30 75\n");
    }

    #[test]
    fn test_recording_order_does_not_affect_report_order() {
        let start = Instant::now();
        let mut log = EventLog::new();
        for (i, region) in [9u16, 2, 7].iter().enumerate() {
            let open = start + Duration::from_micros(i as u64 * 20);
            log.record_at(*region, Phase::begin(1).unwrap(), open);
            log.record_at(*region, Phase::End, open + Duration::from_micros(10));
        }

        let stats = aggregate(&log).unwrap();
        let report = render_to_string(&stats, log.time_span().unwrap()).unwrap();

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("# 2 "));
        assert!(lines[1].starts_with("# 7 "));
        assert!(lines[2].starts_with("# 9 "));
    }

    #[test]
    fn test_real_clock_trace() {
        let mut log = EventLog::new();
        log.record(1, Phase::begin(1).unwrap());
        std::thread::sleep(Duration::from_millis(5));
        log.record(1, Phase::End);

        let stats = aggregate(&log).unwrap();
        assert_eq!(stats[&1].count, 1);
        assert!(stats[&1].total >= Duration::from_millis(5));

        let report = render_to_string(&stats, log.time_span().unwrap()).unwrap();
        assert!(report.starts_with("# 1 1 "));
    }

    #[test]
    fn test_degenerate_single_event_log() {
        let mut log = EventLog::new();
        log.record(1, Phase::begin(1).unwrap());

        assert!(matches!(log.time_span(), Err(RecorderError::EmptyLog)));
    }

    #[test]
    fn test_summary_matches_rendered_text() {
        let start = Instant::now();
        let mut log = EventLog::new();
        log.record_at(3, Phase::begin(2).unwrap(), start);
        log.record_at(3, Phase::End, start + Duration::from_micros(60));
        log.record_at(8, Phase::begin(2).unwrap(), start + Duration::from_micros(60));
        log.record_at(8, Phase::End, start + Duration::from_micros(80));

        let stats = aggregate(&log).unwrap();
        let span = log.time_span().unwrap();

        let summary = ProfileSummary::from_stats(&stats, span).unwrap();
        assert_eq!(summary.span_us, 80);
        assert_eq!(summary.regions.len(), 2);
        assert_eq!(summary.regions[0].region, 3);
        assert_eq!(summary.regions[0].percent, 75.0);
        assert_eq!(summary.regions[1].region, 8);
        assert_eq!(summary.regions[1].percent, 25.0);

        let text = render_to_string(&stats, span).unwrap();
        assert_eq!(text, "# 3 1 60 75\n# 8 1 20 25\n");
    }
}

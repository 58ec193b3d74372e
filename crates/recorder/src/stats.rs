//! Pairing of begin/end events into per-region timing statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::{RecorderError, RecorderResult};
use crate::event::{Event, EventLog, Phase, RegionId};

/// Accumulated timing statistics for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStats {
    /// Number of completed begin/end pairs
    pub count: u64,
    /// Total elapsed time across all completed pairs
    #[serde(with = "duration_serde")]
    pub total: Duration,
}

impl RegionStats {
    /// Fold one completed pair into the statistics.
    fn record_pair(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
    }
}

/// Per-region statistics keyed by region identifier.
///
/// A `BTreeMap` iterates in ascending identifier order, which the report
/// writer relies on for deterministic output.
pub type StatTable = BTreeMap<RegionId, RegionStats>;

/// Pair begin/end events and accumulate per-region statistics.
///
/// Walks the log once, front to back, keeping a stack of open begin events.
/// Each end event must close the innermost open begin and must name the
/// same region; a mismatch fails with `UnpairedEvent`. A begin left open
/// at the end of the log fails with `UnclosedEvent`.
///
/// The result is fully determined by the log's contents and order.
pub fn aggregate(log: &EventLog) -> RecorderResult<StatTable> {
    let mut stats = StatTable::new();
    let mut pending: Vec<Event> = Vec::new();

    for event in log.events() {
        match event.phase {
            Phase::Begin(_) => pending.push(*event),
            Phase::End => {
                let start = pending.pop().ok_or(RecorderError::UnpairedEvent {
                    expected: None,
                    found: event.region,
                })?;
                if start.region != event.region {
                    return Err(RecorderError::UnpairedEvent {
                        expected: Some(start.region),
                        found: event.region,
                    });
                }

                let elapsed = event.at.saturating_duration_since(start.at);
                stats.entry(event.region).or_default().record_pair(elapsed);
            }
        }
    }

    if let Some(open) = pending.last() {
        return Err(RecorderError::UnclosedEvent {
            region: open.region,
        });
    }

    tracing::debug!(
        target: "recorder::stats",
        events = log.len(),
        regions = stats.len(),
        "aggregation complete"
    );

    Ok(stats)
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_nanos() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}

//! Report rendering for aggregated region statistics.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

use crate::error::{RecorderError, RecorderResult};
use crate::event::RegionId;
use crate::stats::StatTable;

/// One report line: a region's pair count, total time, and share of the
/// log's time span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionLine {
    /// Region identifier
    pub region: RegionId,
    /// Number of completed begin/end pairs
    pub count: u64,
    /// Total elapsed time in whole microseconds
    pub total_us: u64,
    /// Share of the log's time span, in percent
    pub percent: f64,
}

/// Aggregated report data: per-region lines plus the overall time span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    /// Overall log time span in whole microseconds
    pub span_us: u64,
    /// Per-region lines in ascending region order
    pub regions: Vec<RegionLine>,
}

impl ProfileSummary {
    /// Build the summary for a stat table over the given time span.
    ///
    /// Durations are reported in whole microseconds. A span shorter than
    /// one microsecond leaves every percentage undefined and fails with
    /// `DegenerateTimeSpan` instead of dividing by zero.
    pub fn from_stats(stats: &StatTable, span: Duration) -> RecorderResult<Self> {
        let span_us = span.as_micros() as u64;
        if span_us == 0 {
            return Err(RecorderError::DegenerateTimeSpan);
        }

        let regions = stats
            .iter()
            .map(|(&region, stat)| {
                let total_us = stat.total.as_micros() as u64;
                RegionLine {
                    region,
                    count: stat.count,
                    total_us,
                    percent: total_us as f64 * 100.0 / span_us as f64,
                }
            })
            .collect();

        Ok(Self { span_us, regions })
    }

    /// Write the line-oriented text report.
    ///
    /// One newline-terminated line per region, ascending region order, no
    /// header or footer:
    ///
    /// ```text
    /// # <region> <count> <total_us> <percent>
    /// ```
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for line in &self.regions {
            writeln!(
                out,
                "# {} {} {} {}",
                line.region, line.count, line.total_us, line.percent
            )?;
        }
        Ok(())
    }

    /// Export the summary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Render the text report for a stat table to the given destination.
pub fn render<W: Write>(stats: &StatTable, span: Duration, out: &mut W) -> RecorderResult<()> {
    let summary = ProfileSummary::from_stats(stats, span)?;
    summary.write_to(out)?;
    Ok(())
}

/// Render the text report into a string.
pub fn render_to_string(stats: &StatTable, span: Duration) -> RecorderResult<String> {
    let mut buf = Vec::new();
    render(stats, span, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::RegionStats;

    fn table(entries: &[(RegionId, u64, u64)]) -> StatTable {
        entries
            .iter()
            .map(|&(region, count, total_us)| {
                (
                    region,
                    RegionStats {
                        count,
                        total: Duration::from_micros(total_us),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_render_single_region() {
        let stats = table(&[(7, 2, 50)]);
        let report = render_to_string(&stats, Duration::from_micros(100)).unwrap();
        assert_eq!(report, "# 7 2 50 50\n");
    }

    #[test]
    fn test_render_sorted_by_region() {
        let stats = table(&[(9, 1, 10), (1, 1, 10), (5, 1, 10)]);
        let report = render_to_string(&stats, Duration::from_micros(100)).unwrap();

        let regions: Vec<&str> = report
            .lines()
            .map(|line| line.split_whitespace().nth(1).unwrap())
            .collect();
        assert_eq!(regions, vec!["1", "5", "9"]);
    }

    #[test]
    fn test_render_line_shape() {
        let stats = table(&[(3, 4, 25)]);
        let report = render_to_string(&stats, Duration::from_micros(100)).unwrap();

        let fields: Vec<&str> = report.trim_end().split(' ').collect();
        assert_eq!(fields, vec!["#", "3", "4", "25", "25"]);
    }

    #[test]
    fn test_render_empty_table() {
        let stats = StatTable::new();
        let report = render_to_string(&stats, Duration::from_micros(100)).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_zero_span_fails() {
        let stats = table(&[(1, 1, 10)]);
        let err = render_to_string(&stats, Duration::ZERO).unwrap_err();
        assert!(matches!(err, RecorderError::DegenerateTimeSpan));
    }

    #[test]
    fn test_sub_microsecond_span_fails() {
        let stats = table(&[(1, 1, 10)]);
        let err = render_to_string(&stats, Duration::from_nanos(500)).unwrap_err();
        assert!(matches!(err, RecorderError::DegenerateTimeSpan));
    }

    #[test]
    fn test_percentages_bounded() {
        let stats = table(&[(1, 1, 10), (2, 3, 35), (3, 2, 55)]);
        let summary = ProfileSummary::from_stats(&stats, Duration::from_micros(100)).unwrap();

        let mut sum = 0.0;
        for line in &summary.regions {
            assert!(line.percent >= 0.0);
            assert!(line.percent <= 100.0);
            sum += line.percent;
        }
        assert!(sum <= 100.0 + f64::EPSILON);
    }

    #[test]
    fn test_percentages_sum_to_full_coverage() {
        // Two regions tile the whole span, so the shares are exact.
        let stats = table(&[(1, 1, 40), (2, 1, 60)]);
        let summary = ProfileSummary::from_stats(&stats, Duration::from_micros(100)).unwrap();

        assert_eq!(summary.regions[0].percent, 40.0);
        assert_eq!(summary.regions[1].percent, 60.0);
    }

    #[test]
    fn test_summary_json_export() {
        let stats = table(&[(2, 1, 30)]);
        let summary = ProfileSummary::from_stats(&stats, Duration::from_micros(120)).unwrap();

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"span_us\": 120"));
        assert!(json.contains("\"total_us\": 30"));
        assert!(json.contains("\"percent\": 25.0"));
    }
}

//! Timing summary across repeated runs

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Statistical summary of per-run execution times
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSummary {
    /// Number of timed runs
    pub runs: usize,
    pub min: Duration,
    pub max: Duration,
    pub mean: Duration,
    pub median: Duration,
    /// Population standard deviation
    pub std_dev: Duration,
    /// Sum of all run times
    pub total: Duration,
}

impl TimingSummary {
    /// Calculate statistics from a list of durations
    ///
    /// An empty list produces an all-zero summary.
    pub fn from_durations(durations: &[Duration]) -> Self {
        if durations.is_empty() {
            return Self::default();
        }

        let mut sorted = durations.to_vec();
        sorted.sort();
        let runs = sorted.len();

        let total_nanos: u128 = sorted.iter().map(|d| d.as_nanos()).sum();
        let mean_nanos = total_nanos / runs as u128;

        let median = if runs % 2 == 0 {
            let lower = sorted[runs / 2 - 1].as_nanos();
            let upper = sorted[runs / 2].as_nanos();
            nanos_to_duration((lower + upper) / 2)
        } else {
            sorted[runs / 2]
        };

        let variance = sorted
            .iter()
            .map(|d| {
                let diff = d.as_nanos() as f64 - mean_nanos as f64;
                diff * diff
            })
            .sum::<f64>()
            / runs as f64;

        Self {
            runs,
            min: sorted[0],
            max: sorted[runs - 1],
            mean: nanos_to_duration(mean_nanos),
            median,
            std_dev: Duration::from_nanos(variance.sqrt() as u64),
            total: nanos_to_duration(total_nanos),
        }
    }

    /// Spread between slowest and fastest run
    pub fn range(&self) -> Duration {
        self.max.saturating_sub(self.min)
    }
}

impl Default for TimingSummary {
    fn default() -> Self {
        Self {
            runs: 0,
            min: Duration::ZERO,
            max: Duration::ZERO,
            mean: Duration::ZERO,
            median: Duration::ZERO,
            std_dev: Duration::ZERO,
            total: Duration::ZERO,
        }
    }
}

fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

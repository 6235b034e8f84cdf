//! Descriptive statistics over cycle lengths and period lengths.

use crate::config::{MAX_PERIOD_LENGTH, MIN_PERIOD_LENGTH};
use crate::models::{CycleRecord, CycleStats};

/// Per-record period length is clamped to this range before taking the median.
const RECORDED_PERIOD_MIN: i64 = 1;
const RECORDED_PERIOD_MAX: i64 = 10;

/// Summary statistics over a sequence of cycle lengths, oldest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleStatistics {
    pub mean: f64,
    pub median: i64,
    pub standard_deviation: f64,
    pub weighted_average: f64,
}

impl CycleStatistics {
    /// Returns `None` for an empty sequence.
    pub fn from_lengths(lengths: &[i64]) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }

        let n = lengths.len() as f64;
        let mean = lengths.iter().sum::<i64>() as f64 / n;
        let variance = lengths
            .iter()
            .map(|&len| (len as f64 - mean).powi(2))
            .sum::<f64>()
            / n;

        // Later cycles weigh more: weight i+1 for the i-th entry.
        let (weighted_sum, weight_total) = lengths
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sum, total), (i, &len)| {
                let weight = (i + 1) as f64;
                (sum + len as f64 * weight, total + weight)
            });

        Some(Self {
            mean,
            median: median(lengths)?,
            standard_deviation: variance.sqrt(),
            weighted_average: weighted_sum / weight_total,
        })
    }
}

/// Sorted middle value; the truncated mean of the two central values for even counts.
pub fn median(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2
    } else {
        sorted[mid]
    })
}

/// Days between consecutive start dates. `cycles` must be sorted by start.
pub fn cycle_lengths(cycles: &[&CycleRecord]) -> Vec<i64> {
    cycles
        .windows(2)
        .map(|w| (w[1].start_date - w[0].start_date).num_days())
        .collect()
}

/// Median recorded period length over completed records, clamped to 3..=8.
pub fn period_length(cycles: &[&CycleRecord], default: u32) -> u32 {
    let lengths: Vec<i64> = cycles
        .iter()
        .filter_map(|c| c.period_days())
        .map(|days| days.clamp(RECORDED_PERIOD_MIN, RECORDED_PERIOD_MAX))
        .collect();

    match median(&lengths) {
        Some(m) => (m as u32).clamp(MIN_PERIOD_LENGTH, MAX_PERIOD_LENGTH),
        None => default.clamp(MIN_PERIOD_LENGTH, MAX_PERIOD_LENGTH),
    }
}

/// Compute whole-history statistics for the stats view.
pub fn summarize(cycles: &[CycleRecord]) -> CycleStats {
    let mut sorted: Vec<&CycleRecord> = cycles.iter().collect();
    sorted.sort_by_key(|c| c.start_date);

    let Some(last) = sorted.last() else {
        return CycleStats::default();
    };

    let cycle_lengths = cycle_lengths(&sorted);
    let period_lengths: Vec<i64> = sorted.iter().filter_map(|c| c.period_days()).collect();

    CycleStats {
        total_cycles: sorted.len(),
        avg_cycle_length: average(&cycle_lengths),
        avg_period_length: average(&period_lengths),
        shortest_cycle: cycle_lengths.iter().copied().min(),
        longest_cycle: cycle_lengths.iter().copied().max(),
        last_period_start: Some(last.start_date),
        last_period_end: last.end_date,
    }
}

fn average(values: &[i64]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<i64>() as f32 / values.len() as f32)
    }
}

//! Ovulation estimate from back-calculated luteal phases.

use chrono::NaiveDate;

use crate::models::{add_days, CycleRecord, CycleRegularity};

/// Days assumed between the recorded period end and ovulation.
const FOLLICULAR_TO_OVULATION_DAYS: i64 = 14;
/// Back-calculated luteal lengths outside this range are discarded.
const LUTEAL_ESTIMATE_RANGE: std::ops::RangeInclusive<i64> = 10..=18;
/// The averaged luteal phase is clamped to this range.
const LUTEAL_MIN: i64 = 10;
const LUTEAL_MAX: i64 = 16;

pub const MAX_OVULATION_CONFIDENCE: f32 = 0.95;
const STABLE_TREND_SLOPE: f64 = 1.0;
const STABLE_TREND_BOOST: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OvulationEstimate {
    pub day: NaiveDate,
    pub confidence: f32,
    pub luteal_phase: i64,
}

/// Luteal lengths implied by consecutive records whose earlier record has an end date.
/// `cycles` must be sorted by start date.
pub fn luteal_estimates(cycles: &[&CycleRecord]) -> Vec<i64> {
    cycles
        .windows(2)
        .filter_map(|w| {
            let (current, next) = (w[0], w[1]);
            let follicular = current.period_days()?;
            let cycle_length = (next.start_date - current.start_date).num_days();
            let estimated = cycle_length - follicular - FOLLICULAR_TO_OVULATION_DAYS;
            LUTEAL_ESTIMATE_RANGE.contains(&estimated).then_some(estimated)
        })
        .collect()
}

fn default_luteal_phase(regularity: CycleRegularity) -> i64 {
    match regularity {
        CycleRegularity::VeryRegular | CycleRegularity::Regular => 14,
        CycleRegularity::SomewhatIrregular => 13,
        CycleRegularity::Irregular => 12,
    }
}

fn base_confidence(estimates: usize, cycles: usize, regularity: CycleRegularity) -> f32 {
    match regularity {
        CycleRegularity::VeryRegular if estimates >= 3 => 0.85,
        CycleRegularity::Regular if estimates >= 2 => 0.75,
        r if cycles >= 4 && r != CycleRegularity::Irregular => 0.65,
        _ if cycles >= 3 => 0.55,
        _ => 0.40,
    }
}

/// Estimate ovulation for the period expected on `next_period_start`.
///
/// `recent` is the windowed, start-sorted history. The luteal phase is
/// back-calculated from it when possible, otherwise assumed from regularity.
/// Confidence grows with the number of usable estimates and cycles, plus a
/// small boost when the cycle-length trend is flat.
pub fn estimate_ovulation(
    recent: &[&CycleRecord],
    next_period_start: NaiveDate,
    regularity: CycleRegularity,
    trend_slope: f64,
) -> Option<OvulationEstimate> {
    let estimates = luteal_estimates(recent);

    let luteal_phase = if estimates.is_empty() {
        default_luteal_phase(regularity)
    } else {
        let avg = estimates.iter().sum::<i64>() as f64 / estimates.len() as f64;
        (avg.round() as i64).clamp(LUTEAL_MIN, LUTEAL_MAX)
    };

    let mut confidence = base_confidence(estimates.len(), recent.len(), regularity);
    if trend_slope.abs() < STABLE_TREND_SLOPE {
        confidence += STABLE_TREND_BOOST;
    }

    Some(OvulationEstimate {
        day: add_days(next_period_start, -luteal_phase)?,
        confidence: confidence.clamp(0.0, MAX_OVULATION_CONFIDENCE),
        luteal_phase,
    })
}

//! The prediction engine.
//!
//! Histories are sorted before use. An empty history gives nothing, a single
//! record gives a population-average forecast, and anything longer is
//! forecast from its most recent records.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::{ConfigError, PredictionConfig};
use crate::fertility::fertile_window;
use crate::models::{add_days, CycleRecord, CycleRegularity, FertileWindow, Prediction};
use crate::ovulation::estimate_ovulation;
use crate::stats::{cycle_lengths, period_length, CycleStatistics};
use crate::trend::predict_with_trend;

/// Luteal phase assumed when nothing else is known.
const COLD_START_LUTEAL_DAYS: i64 = 14;
const COLD_START_FERTILE_DAYS_BEFORE: i64 = 6;
const COLD_START_FERTILE_DAYS_AFTER: i64 = 1;
const COLD_START_CONFIDENCE: f32 = 0.3;

/// Generate a prediction with the default configuration.
/// Returns `None` for an empty history.
pub fn predict(cycles: &[CycleRecord]) -> Option<Prediction> {
    PredictionEngine::default().predict(cycles)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PredictionEngine {
    config: PredictionConfig,
}

impl PredictionEngine {
    pub fn new(config: PredictionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Forecast the next period from a cycle history in any order.
    ///
    /// One record gives a population-average forecast; two or more run the
    /// trend, regularity and ovulation estimators over the most recent
    /// records. `None` means the history is empty or the forecast would fall
    /// outside the representable calendar.
    pub fn predict(&self, cycles: &[CycleRecord]) -> Option<Prediction> {
        let mut sorted: Vec<&CycleRecord> = cycles.iter().collect();
        sorted.sort_by_key(|c| c.start_date);

        let periods = period_length(&sorted, self.config.default_period_length);

        let prediction = match sorted.as_slice() {
            [] => {
                debug!("no cycles recorded, skipping prediction");
                return None;
            }
            [only] => {
                debug!(start = %only.start_date, "single cycle, using cold-start prediction");
                self.cold_start(only.start_date, periods)
            }
            [.., last] => self.advanced(&sorted, last.start_date, periods),
        };

        if prediction.is_none() {
            warn!(cycles = sorted.len(), "prediction fell outside the supported date range");
        }
        prediction
    }

    fn cold_start(&self, last_start: NaiveDate, period_length: u32) -> Option<Prediction> {
        let mean = i64::from(self.config.cold_start_cycle_length);
        let spread = 2 * i64::from(self.config.cold_start_std_dev);

        let most_likely = add_days(last_start, mean)?;
        let ovulation_day = add_days(most_likely, -COLD_START_LUTEAL_DAYS)?;

        Some(Prediction {
            min_period_start: add_days(last_start, mean - spread)?,
            max_period_start: add_days(last_start, mean + spread)?,
            most_likely_period_start: most_likely,
            period_length,
            ovulation_day,
            ovulation_confidence: COLD_START_CONFIDENCE,
            fertile_window: FertileWindow {
                start: add_days(ovulation_day, -COLD_START_FERTILE_DAYS_BEFORE)?,
                end: add_days(ovulation_day, COLD_START_FERTILE_DAYS_AFTER)?,
            },
            cycle_length: mean,
            cycle_regularity: CycleRegularity::Irregular,
        })
    }

    fn advanced(
        &self,
        sorted: &[&CycleRecord],
        last_start: NaiveDate,
        period_length: u32,
    ) -> Option<Prediction> {
        let recent = &sorted[sorted.len().saturating_sub(self.config.recent_window)..];
        let lengths = cycle_lengths(recent);

        let (Some(trend), Some(stats)) = (
            predict_with_trend(&lengths, self.config.regression_weight),
            CycleStatistics::from_lengths(&lengths),
        ) else {
            debug!("no cycle lengths available, falling back to cold start");
            return self.cold_start(last_start, period_length);
        };

        let regularity = CycleRegularity::from_std_dev(stats.standard_deviation);
        let cycle_length = trend.length.round() as i64;
        let most_likely = add_days(last_start, cycle_length)?;
        let spread = spread_days(regularity, stats.standard_deviation);

        let ovulation = estimate_ovulation(recent, most_likely, regularity, trend.slope)?;
        let fertile = fertile_window(ovulation.day, ovulation.confidence, regularity)?;

        debug!(
            cycles = sorted.len(),
            recent = recent.len(),
            %regularity,
            std_dev = stats.standard_deviation,
            slope = trend.slope,
            cycle_length,
            "advanced prediction"
        );

        Some(Prediction {
            min_period_start: add_days(most_likely, -spread)?,
            max_period_start: add_days(most_likely, spread)?,
            most_likely_period_start: most_likely,
            period_length,
            ovulation_day: ovulation.day,
            ovulation_confidence: ovulation.confidence,
            fertile_window: fertile,
            cycle_length,
            cycle_regularity: regularity,
        })
    }
}

/// Days either side of the most likely start covered by the prediction window.
fn spread_days(regularity: CycleRegularity, std_dev: f64) -> i64 {
    let rounded = std_dev.round() as i64;
    match regularity {
        CycleRegularity::VeryRegular => 1,
        CycleRegularity::Regular => rounded.max(2),
        CycleRegularity::SomewhatIrregular | CycleRegularity::Irregular => {
            (rounded.max(3) as f64 * 1.5).round() as i64
        }
    }
}

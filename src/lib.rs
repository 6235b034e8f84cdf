//! On-device cycle prediction.
//!
//! Given the recorded periods, [`predict`] forecasts the next period's start
//! window, the ovulation day, the fertile window and how regular the recent
//! cycles have been. Everything is computed from the slice passed in; there is
//! no state, no I/O, and the same input always yields the same prediction.
//!
//! ```
//! use chrono::NaiveDate;
//! use cykel_forecast::{predict, BleedingIntensity, BloodColor, CycleRecord};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let record =
//!     CycleRecord::new(start, None, BleedingIntensity::Medium, BloodColor::BrightRed, 2).unwrap();
//! let prediction = predict(&[record]).unwrap();
//! assert_eq!(prediction.most_likely_period_start, NaiveDate::from_ymd_opt(2024, 1, 29).unwrap());
//! ```

pub mod calendar;
pub mod config;
pub mod fertility;
pub mod models;
pub mod ovulation;
pub mod prediction;
pub mod regularity;
pub mod reminders;
pub mod stats;
pub mod trend;

pub use calendar::{day_flags, month_grid, Countdown, DayFlags, MonthGrid};
pub use config::{ConfigError, PredictionConfig};
pub use models::{
    BleedingIntensity, BloodColor, ConfidenceLevel, CycleRecord, CycleRegularity, CycleStats,
    FertileWindow, Prediction, RecordError,
};
pub use prediction::{predict, PredictionEngine};
pub use reminders::{trigger_dates, DueReminder, ReminderKind, ReminderLedger};
pub use stats::{summarize, CycleStatistics};

//! Records, forecast types and their labels.
//!
//! Field values are public. [`CycleRecord::new`] and the `FromStr` impls are
//! the validated way in.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Highest pain level a record may carry.
pub const MAX_PAIN_LEVEL: u8 = 10;

/// `date` shifted by `days`, or `None` outside chrono's calendar range.
pub(crate) fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(chrono::Duration::try_days(days)?)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("pain level {0} is outside 0-10")]
    PainOutOfRange(u8),
    #[error("unknown bleeding intensity: {0}")]
    UnknownIntensity(String),
    #[error("unknown blood color: {0}")]
    UnknownColor(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BleedingIntensity {
    Heavy,
    Medium,
    Light,
    Spotting,
}

impl BleedingIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heavy => "Heavy",
            Self::Medium => "Medium",
            Self::Light => "Light",
            Self::Spotting => "Spotting",
        }
    }
}

impl fmt::Display for BleedingIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BleedingIntensity {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Heavy" => Ok(Self::Heavy),
            "Medium" => Ok(Self::Medium),
            "Light" => Ok(Self::Light),
            "Spotting" => Ok(Self::Spotting),
            other => Err(RecordError::UnknownIntensity(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BloodColor {
    #[serde(rename = "Bright Red")]
    BrightRed,
    #[serde(rename = "Dark Red")]
    DarkRed,
    Brown,
}

impl BloodColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrightRed => "Bright Red",
            Self::DarkRed => "Dark Red",
            Self::Brown => "Brown",
        }
    }
}

impl fmt::Display for BloodColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodColor {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Bright Red" => Ok(Self::BrightRed),
            "Dark Red" => Ok(Self::DarkRed),
            "Brown" => Ok(Self::Brown),
            other => Err(RecordError::UnknownColor(other.to_string())),
        }
    }
}

/// One recorded period. `end_date` is `None` while the period is ongoing
/// or when the user never logged an end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleRecord {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub bleeding_intensity: BleedingIntensity,
    pub blood_color: BloodColor,
    pub pain_level: u8,
}

impl CycleRecord {
    /// Build a validated record with a fresh id.
    pub fn new(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        bleeding_intensity: BleedingIntensity,
        blood_color: BloodColor,
        pain_level: u8,
    ) -> Result<Self, RecordError> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(RecordError::EndBeforeStart {
                    start: start_date,
                    end,
                });
            }
        }
        if pain_level > MAX_PAIN_LEVEL {
            return Err(RecordError::PainOutOfRange(pain_level));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            bleeding_intensity,
            blood_color,
            pain_level,
        })
    }

    /// Days from start to end, or `None` for an open record.
    pub fn period_days(&self) -> Option<i64> {
        self.end_date.map(|end| (end - self.start_date).num_days())
    }

    /// Whether `date` falls inside this period. Open records extend indefinitely.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleRegularity {
    VeryRegular,
    Regular,
    SomewhatIrregular,
    Irregular,
}

impl CycleRegularity {
    /// Confidence shown next to the period window for this regularity.
    pub fn confidence(&self) -> f32 {
        match self {
            Self::VeryRegular => 0.9,
            Self::Regular => 0.75,
            Self::SomewhatIrregular => 0.6,
            Self::Irregular => 0.4,
        }
    }
}

impl fmt::Display for CycleRegularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VeryRegular => "Very regular",
            Self::Regular => "Regular",
            Self::SomewhatIrregular => "Somewhat irregular",
            Self::Irregular => "Irregular",
        })
    }
}

/// Coarse bucket for a confidence score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfidenceLevel {
    Low,
    Fair,
    Good,
    High,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.8 {
            Self::High
        } else if confidence >= 0.6 {
            Self::Good
        } else if confidence >= 0.4 {
            Self::Fair
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "High",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Low => "Low",
        })
    }
}

/// Inclusive date range in which conception is most likely.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FertileWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FertileWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days in the window, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub min_period_start: NaiveDate,
    pub max_period_start: NaiveDate,
    pub most_likely_period_start: NaiveDate,
    pub period_length: u32,
    pub ovulation_day: NaiveDate,
    pub ovulation_confidence: f32,
    pub fertile_window: FertileWindow,
    pub cycle_length: i64,
    pub cycle_regularity: CycleRegularity,
}

impl Prediction {
    pub fn ovulation_confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.ovulation_confidence)
    }
}

/// Whole-history aggregates for the stats view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CycleStats {
    pub total_cycles: usize,
    pub avg_cycle_length: Option<f32>,
    pub avg_period_length: Option<f32>,
    pub shortest_cycle: Option<i64>,
    pub longest_cycle: Option<i64>,
    pub last_period_start: Option<NaiveDate>,
    pub last_period_end: Option<NaiveDate>,
}

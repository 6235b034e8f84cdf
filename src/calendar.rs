//! Calendar view data derived from the history and a forecast.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{add_days, CycleRecord, Prediction};

/// Days shown in a month grid: six full weeks.
pub const GRID_DAYS: i64 = 42;

/// What a single calendar day represents.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayFlags {
    pub in_cycle: bool,
    pub fertile: bool,
    pub ovulation: bool,
    pub predicted_period: bool,
    pub today: bool,
}

pub fn day_flags(
    date: NaiveDate,
    cycles: &[CycleRecord],
    prediction: Option<&Prediction>,
    today: NaiveDate,
) -> DayFlags {
    let mut flags = DayFlags {
        in_cycle: cycles.iter().any(|c| c.covers(date)),
        today: date == today,
        ..DayFlags::default()
    };

    if let Some(pred) = prediction {
        flags.fertile = pred.fertile_window.contains(date);
        flags.ovulation = pred.ovulation_day == date;
        let offset = (date - pred.most_likely_period_start).num_days();
        flags.predicted_period = (0..i64::from(pred.period_length)).contains(&offset);
    }

    flags
}

/// Data for a month view: a Sunday-first grid of six weeks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<(NaiveDate, DayFlags)>,
}

impl MonthGrid {
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.first().map(|(d, _)| *d)
    }

    pub fn flags_for(&self, date: NaiveDate) -> Option<DayFlags> {
        self.days.iter().find(|(d, _)| *d == date).map(|(_, f)| *f)
    }
}

/// Build the grid for `year`/`month`, or `None` for an invalid month.
pub fn month_grid(
    year: i32,
    month: u32,
    cycles: &[CycleRecord],
    prediction: Option<&Prediction>,
    today: NaiveDate,
) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let leading = i64::from(first.weekday().num_days_from_sunday());
    let grid_start = add_days(first, -leading)?;

    let days = (0..GRID_DAYS)
        .map(|offset| {
            let date = add_days(grid_start, offset)?;
            Some((date, day_flags(date, cycles, prediction, today)))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(MonthGrid { year, month, days })
}

/// Days until the most likely start, as shown on the upcoming-period banner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Countdown {
    Overdue(i64),
    Today,
    Tomorrow,
    DaysLeft(i64),
}

impl Countdown {
    pub fn between(today: NaiveDate, target: NaiveDate) -> Self {
        match (target - today).num_days() {
            diff if diff < 0 => Self::Overdue(-diff),
            0 => Self::Today,
            1 => Self::Tomorrow,
            diff => Self::DaysLeft(diff),
        }
    }
}

impl std::fmt::Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overdue(days) => write!(f, "Overdue by {days}d"),
            Self::Today => f.write_str("Today"),
            Self::Tomorrow => f.write_str("Tomorrow"),
            Self::DaysLeft(days) => write!(f, "{days}d left"),
        }
    }
}

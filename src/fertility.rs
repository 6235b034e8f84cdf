//! Fertile window around an estimated ovulation day.

use chrono::NaiveDate;

use crate::models::{add_days, CycleRegularity, FertileWindow};

/// Estimate the fertile window around an ovulation day.
/// Five or six days before ovulation depending on how much the estimate can
/// be trusted; one or two days after.
pub fn fertile_window(
    ovulation_day: NaiveDate,
    confidence: f32,
    regularity: CycleRegularity,
) -> Option<FertileWindow> {
    let narrow = (confidence > 0.8 && regularity == CycleRegularity::VeryRegular)
        || (confidence > 0.6 && regularity != CycleRegularity::Irregular);
    let days_before = if narrow { 5 } else { 6 };
    let days_after = if confidence > 0.7 { 1 } else { 2 };

    Some(FertileWindow {
        start: add_days(ovulation_day, -days_before)?,
        end: add_days(ovulation_day, days_after)?,
    })
}

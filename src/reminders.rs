//! Reminder planning for the upcoming period.
//!
//! Reminders fire five and two days before the most likely start. The ledger
//! remembers what was already delivered for the current target date so a
//! reminder never fires twice, and forgets it as soon as the forecast moves.
//! Delivery itself belongs to the caller.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{add_days, Prediction};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReminderKind {
    FiveDaysBefore,
    TwoDaysBefore,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 2] = [ReminderKind::FiveDaysBefore, ReminderKind::TwoDaysBefore];

    pub fn lead_days(self) -> i64 {
        match self {
            Self::FiveDaysBefore => 5,
            Self::TwoDaysBefore => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DueReminder {
    pub kind: ReminderKind,
    /// Most likely period start the reminder refers to.
    pub target: NaiveDate,
    pub fire_on: NaiveDate,
}

/// Dates on which each reminder should fire for `prediction`.
pub fn trigger_dates(prediction: &Prediction) -> Vec<DueReminder> {
    let target = prediction.most_likely_period_start;
    ReminderKind::ALL
        .iter()
        .filter_map(|&kind| {
            Some(DueReminder {
                kind,
                target,
                fire_on: add_days(target, -kind.lead_days())?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderLedger {
    target: Option<NaiveDate>,
    delivered: BTreeSet<ReminderKind>,
}

impl ReminderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(&self) -> Option<NaiveDate> {
        self.target
    }

    /// Track the forecast's target date. Returns true when it moved, in which
    /// case every delivered flag is cleared.
    pub fn observe(&mut self, prediction: &Prediction) -> bool {
        self.retarget(prediction.most_likely_period_start)
    }

    fn retarget(&mut self, target: NaiveDate) -> bool {
        if self.target == Some(target) {
            return false;
        }
        debug!(previous = ?self.target, %target, "reminder target moved, clearing delivered flags");
        self.target = Some(target);
        self.delivered.clear();
        true
    }

    pub fn is_delivered(&self, kind: ReminderKind, target: NaiveDate) -> bool {
        self.target == Some(target) && self.delivered.contains(&kind)
    }

    /// Reminders that fall on `today` and were not delivered yet.
    pub fn due(&self, prediction: &Prediction, today: NaiveDate) -> Vec<DueReminder> {
        trigger_dates(prediction)
            .into_iter()
            .filter(|r| r.fire_on == today && !self.is_delivered(r.kind, r.target))
            .collect()
    }

    pub fn mark_delivered(&mut self, reminder: DueReminder) {
        self.retarget(reminder.target);
        self.delivered.insert(reminder.kind);
    }

    /// Daily check: follow the forecast, return what is due today and
    /// record it as delivered.
    pub fn check(&mut self, prediction: Option<&Prediction>, today: NaiveDate) -> Vec<DueReminder> {
        let Some(prediction) = prediction else {
            return Vec::new();
        };
        self.observe(prediction);
        let due = self.due(prediction, today);
        for reminder in &due {
            self.mark_delivered(*reminder);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CycleRegularity, FertileWindow};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn prediction_for(target: &str) -> Prediction {
        let target = date(target);
        Prediction {
            min_period_start: target,
            max_period_start: target,
            most_likely_period_start: target,
            period_length: 5,
            ovulation_day: target,
            ovulation_confidence: 0.5,
            fertile_window: FertileWindow {
                start: target,
                end: target,
            },
            cycle_length: 28,
            cycle_regularity: CycleRegularity::Regular,
        }
    }

    #[test]
    fn trigger_dates_precede_target() {
        let dates = trigger_dates(&prediction_for("2026-03-10"));
        assert_eq!(dates[0].kind, ReminderKind::FiveDaysBefore);
        assert_eq!(dates[0].fire_on, date("2026-03-05"));
        assert_eq!(dates[1].kind, ReminderKind::TwoDaysBefore);
        assert_eq!(dates[1].fire_on, date("2026-03-08"));
    }

    #[test]
    fn fires_once_per_target() {
        let pred = prediction_for("2026-03-10");
        let mut ledger = ReminderLedger::new();

        let due = ledger.check(Some(&pred), date("2026-03-05"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].kind, ReminderKind::FiveDaysBefore);

        assert!(ledger.check(Some(&pred), date("2026-03-05")).is_empty());
        assert!(ledger.check(Some(&pred), date("2026-03-06")).is_empty());

        let due = ledger.check(Some(&pred), date("2026-03-08"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].kind, ReminderKind::TwoDaysBefore);
    }

    #[test]
    fn moved_target_rearms_reminders() {
        let mut ledger = ReminderLedger::new();
        let first = prediction_for("2026-03-10");
        ledger.check(Some(&first), date("2026-03-05"));
        assert!(ledger.is_delivered(ReminderKind::FiveDaysBefore, date("2026-03-10")));

        let moved = prediction_for("2026-03-12");
        assert!(ledger.observe(&moved));
        assert!(!ledger.is_delivered(ReminderKind::FiveDaysBefore, date("2026-03-10")));

        let due = ledger.check(Some(&moved), date("2026-03-07"));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].target, date("2026-03-12"));
    }

    #[test]
    fn observing_same_target_keeps_flags() {
        let pred = prediction_for("2026-03-10");
        let mut ledger = ReminderLedger::new();
        assert!(ledger.observe(&pred));
        ledger.check(Some(&pred), date("2026-03-08"));
        assert!(!ledger.observe(&pred));
        assert!(ledger.is_delivered(ReminderKind::TwoDaysBefore, date("2026-03-10")));
    }

    #[test]
    fn nothing_due_without_prediction() {
        let mut ledger = ReminderLedger::new();
        assert!(ledger.check(None, date("2026-03-05")).is_empty());
        assert_eq!(ledger.target(), None);
    }

    #[test]
    fn ledger_survives_json() {
        let pred = prediction_for("2026-03-10");
        let mut ledger = ReminderLedger::new();
        ledger.check(Some(&pred), date("2026-03-05"));

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: ReminderLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ledger);
        assert!(restored.due(&pred, date("2026-03-05")).is_empty());
    }
}

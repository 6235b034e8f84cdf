use chrono::{Duration, NaiveDate};
use cykel_forecast::{predict, BleedingIntensity, BloodColor, CycleRecord, PredictionEngine};
use proptest::prelude::*;
use uuid::Uuid;

fn build_history(
    base_offset: i64,
    entries: &[(i64, Option<i64>)],
    rotate: usize,
) -> Vec<CycleRecord> {
    let mut start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(base_offset);
    let mut records = Vec::with_capacity(entries.len());
    for (gap, period) in entries {
        start += Duration::days(*gap);
        records.push(CycleRecord {
            id: Uuid::new_v4(),
            start_date: start,
            end_date: period.map(|d| start + Duration::days(d)),
            bleeding_intensity: BleedingIntensity::Light,
            blood_color: BloodColor::Brown,
            pain_level: 1,
        });
    }
    if !records.is_empty() {
        let by = rotate % records.len();
        records.rotate_left(by);
    }
    records
}

fn arb_entries() -> impl Strategy<Value = Vec<(i64, Option<i64>)>> {
    prop::collection::vec((0i64..=400, prop::option::of(-3i64..=20)), 0..12)
}

// ── Output domains ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn prediction_fields_stay_in_domain(
        base in 0i64..20_000,
        entries in arb_entries(),
        rotate in 0usize..12,
    ) {
        let cycles = build_history(base, &entries, rotate);
        match predict(&cycles) {
            None => prop_assert!(cycles.is_empty()),
            Some(pred) => {
                prop_assert!(pred.min_period_start <= pred.most_likely_period_start);
                prop_assert!(pred.most_likely_period_start <= pred.max_period_start);
                prop_assert!((3..=8).contains(&pred.period_length));
                prop_assert!(pred.ovulation_confidence >= 0.0);
                prop_assert!(pred.ovulation_confidence <= 0.95);
                prop_assert!(pred.fertile_window.start <= pred.fertile_window.end);
                prop_assert!(pred.fertile_window.contains(pred.ovulation_day));

                prop_assert_eq!(
                    pred.most_likely_period_start - pred.min_period_start,
                    pred.max_period_start - pred.most_likely_period_start
                );
            }
        }
    }

    #[test]
    fn prediction_is_idempotent(
        base in 0i64..20_000,
        entries in arb_entries(),
    ) {
        let cycles = build_history(base, &entries, 0);
        let engine = PredictionEngine::default();
        let first = engine.predict(&cycles);
        let second = engine.predict(&cycles);
        prop_assert_eq!(&first, &second);
        if let (Some(a), Some(b)) = (first, second) {
            prop_assert_eq!(a.ovulation_confidence.to_bits(), b.ovulation_confidence.to_bits());
        }
    }

    #[test]
    fn prediction_ignores_input_order(
        base in 0i64..20_000,
        entries in arb_entries(),
        rotate in 0usize..12,
    ) {
        // distinct start dates so the sort has no ties
        let entries: Vec<(i64, Option<i64>)> =
            entries.into_iter().map(|(gap, p)| (gap.max(1), p)).collect();
        let ordered = build_history(base, &entries, 0);
        let rotated = build_history(base, &entries, rotate);
        prop_assert_eq!(predict(&ordered), predict(&rotated));
    }
}

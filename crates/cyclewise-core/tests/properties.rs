//! Property tests for the statistical primitives and the orchestrator

use chrono::{Duration, NaiveDate};
use cyclewise_core::analytics::{analyze_patterns, calculate_average, calculate_correlation, find_frequent_pairs};
use cyclewise_core::models::{CyclePhase, DailyLog, Symptom};
use proptest::prelude::*;

fn maybe_value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        Just(Some(f64::NAN)),
        (-1e12f64..1e12).prop_map(Some),
        (-10.0f64..10.0).prop_map(Some),
    ]
}

fn arb_log() -> impl Strategy<Value = (Option<u8>, Option<u8>, Option<u8>, Option<f64>, u8, Vec<usize>)> {
    (
        proptest::option::of(1u8..=10),
        proptest::option::of(1u8..=10),
        proptest::option::of(1u8..=10),
        proptest::option::of(0.0f64..12.0),
        0u8..6,
        proptest::collection::vec(0usize..Symptom::ALL.len(), 0..4),
    )
}

fn build_logs(specs: Vec<(Option<u8>, Option<u8>, Option<u8>, Option<f64>, u8, Vec<usize>)>) -> Vec<DailyLog> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let phases = [
        None,
        Some(CyclePhase::Menstrual),
        Some(CyclePhase::Follicular),
        Some(CyclePhase::Ovulation),
        Some(CyclePhase::Luteal),
        Some(CyclePhase::Unknown),
    ];
    specs
        .into_iter()
        .enumerate()
        .map(|(i, (energy, quality, stress, hours, phase, symptoms))| {
            let mut log = DailyLog::new("prop", start + Duration::days(i as i64));
            log.energy_level = energy;
            log.sleep_quality = quality;
            log.stress_level = stress;
            log.sleep_hours = hours;
            log.cycle_phase = phases[phase as usize];
            log.physical_symptoms = symptoms.into_iter().map(|s| Symptom::ALL[s]).collect();
            log
        })
        .collect()
}

proptest! {
    #[test]
    fn average_is_never_nan(values in proptest::collection::vec(maybe_value(), 0..40)) {
        prop_assert!(!calculate_average(&values).is_nan());
    }

    #[test]
    fn all_absent_average_is_zero(len in 0usize..20) {
        prop_assert_eq!(calculate_average(&vec![None; len]), 0.0);
    }

    #[test]
    fn correlation_coefficient_is_bounded(
        pairs in proptest::collection::vec((maybe_value(), maybe_value()), 0..60)
    ) {
        let (x, y): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        let result = calculate_correlation(&x, &y);
        prop_assert!((-1.0..=1.0).contains(&result.coefficient));
        prop_assert!(!result.p_value.is_nan());
        if result.sample_size < 5 {
            prop_assert_eq!(result.coefficient, 0.0);
            prop_assert_eq!(result.p_value, 1.0);
        }
    }

    #[test]
    fn frequent_pairs_ignore_order(
        groups in proptest::collection::vec(
            proptest::collection::btree_set(0usize..6, 0..5), 0..25
        ),
        seed in any::<u64>()
    ) {
        let names = ["bloating", "cramps", "fatigue", "headache", "insomnia", "joint_pain"];
        let forward: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.iter().map(|&i| names[i]).collect())
            .collect();

        // Reverse tags inside each set and rotate the set order
        let mut shuffled: Vec<Vec<&str>> = forward
            .iter()
            .map(|g| g.iter().rev().copied().collect())
            .collect();
        if !shuffled.is_empty() {
            let by = (seed as usize) % shuffled.len();
            shuffled.rotate_left(by);
        }

        prop_assert_eq!(find_frequent_pairs(&forward), find_frequent_pairs(&shuffled));
    }

    #[test]
    fn insights_are_bounded_ranked_and_idempotent(
        specs in proptest::collection::vec(arb_log(), 0..40)
    ) {
        let logs = build_logs(specs);
        let first = analyze_patterns(&logs);

        prop_assert!(!first.is_empty());
        for insight in &first {
            prop_assert!((0.0..=1.0).contains(&insight.confidence_score));
        }
        for pair in first.windows(2) {
            prop_assert!(pair[0].confidence_score >= pair[1].confidence_score);
        }
        prop_assert_eq!(first, analyze_patterns(&logs));
    }
}

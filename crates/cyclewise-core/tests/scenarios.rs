//! End-to-end analyzer scenarios over hand-built log histories

use chrono::{Duration, NaiveDate};
use cyclewise_core::analytics::{
    analyze_patterns, calculate_correlation, detect_cycle_phase_patterns, detect_sleep_impact,
    generate_recommendations,
};
use cyclewise_core::models::{CyclePhase, DailyLog, InsightData, InsightType, Symptom};

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap() + Duration::days(offset)
}

fn blank_logs(count: i64) -> Vec<DailyLog> {
    (0..count).map(|i| DailyLog::new("demo", day(i))).collect()
}

#[test]
fn scenario_three_logs_keep_logging() {
    let insights = analyze_patterns(&blank_logs(3));

    assert_eq!(insights.len(), 1);
    let only = &insights[0];
    assert_eq!(only.insight_type, InsightType::Recommendation);
    assert!(!only.is_premium);
    assert_eq!(only.confidence_score, 1.0);
    assert!(only.description.contains('3'));
}

#[test]
fn scenario_sleep_duration_buckets() {
    // Alternate good and poor nights so buckets are mixed across dates
    let logs: Vec<DailyLog> = (0..10)
        .map(|i| {
            let mut log = DailyLog::new("demo", day(i));
            let good = i % 2 == 1;
            log.sleep_hours = Some(if good { 8.0 } else { 5.0 });
            log.energy_level = Some(if good { 8 } else { 4 });
            log
        })
        .collect();

    let insight = detect_sleep_impact(&logs)
        .into_iter()
        .find(|i| matches!(i.data, Some(InsightData::SleepDuration { .. })))
        .expect("duration insight");

    assert_eq!(insight.insight_type, InsightType::Correlation);
    assert!(insight.is_premium);
    assert_eq!(insight.confidence_score, 0.9);
    match insight.data {
        Some(InsightData::SleepDuration {
            good_sleep_energy,
            poor_sleep_energy,
            ..
        }) => {
            assert_eq!(good_sleep_energy, 8.0);
            assert_eq!(poor_sleep_energy, 4.0);
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn scenario_high_stress_short_sleep_recommendations() {
    let logs: Vec<DailyLog> = blank_logs(14)
        .into_iter()
        .map(|mut log| {
            log.stress_level = Some(8);
            log.sleep_hours = Some(5.0);
            log
        })
        .collect();

    let recs = generate_recommendations(&logs);

    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.insight_type == InsightType::Recommendation));
    assert!(recs.iter().all(|r| r.is_premium));
    assert_eq!(recs[0].confidence_score, 0.85);
    assert_eq!(recs[1].confidence_score, 0.8);
}

#[test]
fn scenario_luteal_symptom_burden() {
    let logs: Vec<DailyLog> = (0..10)
        .map(|i| {
            let mut log = DailyLog::new("demo", day(i));
            if i < 5 {
                log.cycle_phase = Some(CyclePhase::Luteal);
                if i < 4 {
                    log.physical_symptoms.insert(Symptom::Bloating);
                }
            } else {
                log.cycle_phase = Some(CyclePhase::Follicular);
            }
            log
        })
        .collect();

    let insight = detect_cycle_phase_patterns(&logs)
        .into_iter()
        .find(|i| i.title == "Luteal phase symptoms detected")
        .expect("luteal insight");

    assert_eq!(insight.insight_type, InsightType::PhasePattern);
    assert!(insight.is_premium);
    assert_eq!(insight.confidence_score, 0.75);
}

#[test]
fn scenario_zero_variance_correlation() {
    let x = vec![Some(5.0); 8];
    let y: Vec<Option<f64>> = (1..=8).map(|v| Some(v as f64)).collect();

    let result = calculate_correlation(&x, &y);

    assert_eq!(result.coefficient, 0.0);
    assert!(!result.coefficient.is_nan());
    assert!(!result.p_value.is_nan());
    assert_eq!(result.sample_size, 8);
}

#[test]
fn scenario_full_history_ranked() {
    // Four weeks: stress drags energy down, luteal week brings symptoms
    let phases = [
        CyclePhase::Menstrual,
        CyclePhase::Follicular,
        CyclePhase::Ovulation,
        CyclePhase::Luteal,
    ];
    let logs: Vec<DailyLog> = (0..28)
        .map(|i| {
            let mut log = DailyLog::new("demo", day(i));
            let stress = (i % 9 + 1) as u8;
            log.stress_level = Some(stress);
            log.energy_level = Some(10 - stress.min(9));
            log.sleep_quality = Some(6);
            log.sleep_hours = Some(6.0);
            log.cycle_phase = Some(phases[(i / 7) as usize]);
            if i >= 21 {
                log.physical_symptoms.insert(Symptom::Cramps);
                log.physical_symptoms.insert(Symptom::Fatigue);
            }
            log
        })
        .collect();

    let insights = analyze_patterns(&logs);

    assert!(insights
        .iter()
        .any(|i| i.title == "Stress drains your energy"));
    assert!(insights
        .iter()
        .any(|i| i.title == "Sleep optimization opportunity"));
    for pair in insights.windows(2) {
        assert!(pair[0].confidence_score >= pair[1].confidence_score);
    }
}

//! Stress impact detection
//!
//! Same-day stress vs energy, and how often symptoms show up on high-stress
//! days compared to calm ones.

use cyclewise_types::{DailyLog, InsightData, InsightType, PatternInsight};

use super::stats::{calculate_average, calculate_correlation};
use super::{reported_score, symptom_rate, MIN_LOGS_FOR_INSIGHTS};

/// Stress at or above this is a high-stress day
pub const HIGH_STRESS: u8 = 7;

/// Stress at or below this is a low-stress day
pub const LOW_STRESS: u8 = 3;

/// Paired days needed before the stress/energy correlation is trusted
const MIN_STRESS_ENERGY_PAIRS: usize = 7;

/// |r| screening gate for the stress/energy correlation
const SCREENING_THRESHOLD: f64 = 0.25;

/// r below which stress is reported as draining energy
const DRAIN_THRESHOLD: f64 = -0.3;

/// Days needed in each stress bucket
const MIN_BUCKET_DAYS: usize = 3;

/// Symptom-rate gap (fraction of days) required to report
const MIN_SYMPTOM_RATE_GAP: f64 = 0.2;

/// Detect stress/energy and stress/symptom relationships
pub fn detect_stress_patterns(logs: &[DailyLog]) -> Vec<PatternInsight> {
    let mut insights = Vec::new();

    if logs.len() < MIN_LOGS_FOR_INSIGHTS {
        return insights;
    }

    let stress: Vec<Option<f64>> = logs.iter().map(DailyLog::stress).collect();
    let energy: Vec<Option<f64>> = logs.iter().map(DailyLog::energy).collect();
    let correlation = calculate_correlation(&stress, &energy);

    if correlation.sample_size >= MIN_STRESS_ENERGY_PAIRS
        && correlation.coefficient.abs() > SCREENING_THRESHOLD
        && correlation.coefficient < DRAIN_THRESHOLD
    {
        insights.push(
            PatternInsight::new(
                InsightType::Correlation,
                "Stress drains your energy",
                format!(
                    "High stress days predict lower energy (correlation: {:.2}).{}",
                    correlation.coefficient,
                    energy_drop_sentence(logs)
                ),
                correlation.coefficient.abs(),
                true,
            )
            .with_data(InsightData::Correlation {
                coefficient: correlation.coefficient,
                p_value: correlation.p_value,
                sample_size: correlation.sample_size,
            }),
        );
    }

    let high_stress: Vec<&DailyLog> = logs
        .iter()
        .filter(|log| reported_score(log.stress_level).is_some_and(|s| s >= HIGH_STRESS))
        .collect();
    let low_stress: Vec<&DailyLog> = logs
        .iter()
        .filter(|log| reported_score(log.stress_level).is_some_and(|s| s <= LOW_STRESS))
        .collect();

    if high_stress.len() >= MIN_BUCKET_DAYS && low_stress.len() >= MIN_BUCKET_DAYS {
        let high_rate = symptom_rate(&high_stress);
        let low_rate = symptom_rate(&low_stress);

        if high_rate > low_rate + MIN_SYMPTOM_RATE_GAP {
            insights.push(
                PatternInsight::new(
                    InsightType::Correlation,
                    "Stress triggers physical symptoms",
                    format!(
                        "Physical symptoms are {}% more frequent on high-stress days. Your body is clearly signaling when stress is too high.",
                        ((high_rate - low_rate) * 100.0).round()
                    ),
                    0.75,
                    true,
                )
                .with_data(InsightData::RateGap {
                    high_rate,
                    low_rate,
                }),
            );
        }
    }

    insights
}

/// Mean energy gap between days with stress above 6 and the rest
///
/// Empty when either side has no energy readings.
fn energy_drop_sentence(logs: &[DailyLog]) -> String {
    let (stressed, other): (Vec<&DailyLog>, Vec<&DailyLog>) = logs
        .iter()
        .filter(|log| log.stress_level.is_some() && log.energy_level.is_some())
        .partition(|log| log.stress_level.is_some_and(|s| s > 6));

    if stressed.is_empty() || other.is_empty() {
        return String::new();
    }

    let stressed_energy: Vec<Option<f64>> = stressed.iter().map(|log| log.energy()).collect();
    let other_energy: Vec<Option<f64>> = other.iter().map(|log| log.energy()).collect();
    let drop = calculate_average(&other_energy) - calculate_average(&stressed_energy);

    format!(
        " On days when stress is above 6, your energy drops by an average of {:.1} points.",
        drop
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cyclewise_types::Symptom;

    fn log(i: i64, stress: u8, energy: u8) -> DailyLog {
        let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap() + chrono::Duration::days(i);
        let mut log = DailyLog::new("demo", date);
        log.stress_level = Some(stress);
        log.energy_level = Some(energy);
        log
    }

    #[test]
    fn test_stress_drains_energy() {
        let logs: Vec<_> = [(2, 8), (8, 3), (3, 7), (9, 2), (5, 5), (7, 4), (1, 9), (6, 4)]
            .iter()
            .enumerate()
            .map(|(i, (s, e))| log(i as i64, *s, *e))
            .collect();

        let insights = detect_stress_patterns(&logs);
        assert_eq!(insights.len(), 1);
        let drain = &insights[0];

        assert_eq!(drain.title, "Stress drains your energy");
        assert!(drain.is_premium);
        assert!(drain.confidence_score > 0.9);
        // Stress > 6: energies 3, 2, 4 (avg 3.0); others: 8, 7, 5, 9, 4 (avg 6.6)
        assert!(drain.description.contains("drops by an average of 3.6 points"));
    }

    #[test]
    fn test_positive_stress_energy_is_silent() {
        let logs: Vec<_> = (0..8).map(|i| log(i, (i + 1) as u8, (i + 2) as u8)).collect();
        assert!(detect_stress_patterns(&logs).is_empty());
    }

    #[test]
    fn test_symptoms_cluster_on_high_stress_days() {
        let mut logs: Vec<_> = (0..8)
            .map(|i| if i < 4 { log(i, 8, 5) } else { log(i, 2, 5) })
            .collect();
        for log in logs.iter_mut().take(3) {
            log.physical_symptoms.insert(Symptom::Headache);
        }

        let insights = detect_stress_patterns(&logs);
        let symptoms = insights
            .iter()
            .find(|i| i.title == "Stress triggers physical symptoms")
            .expect("symptom insight");

        assert_eq!(symptoms.confidence_score, 0.75);
        assert!(symptoms.description.starts_with("Physical symptoms are 75% more frequent"));
    }

    #[test]
    fn test_small_symptom_gap_is_ignored() {
        let mut logs: Vec<_> = (0..10)
            .map(|i| if i < 5 { log(i, 9, 5) } else { log(i, 1, 5) })
            .collect();
        logs[0].physical_symptoms.insert(Symptom::Cramps);
        logs[5].physical_symptoms.insert(Symptom::Cramps);

        assert!(detect_stress_patterns(&logs).is_empty());
    }
}

//! Actionable recommendations
//!
//! Rule-based suggestions from aggregate averages. Needs a longer baseline
//! than the detectors.

use cyclewise_types::{DailyLog, InsightData, InsightType, PatternInsight};

use super::stats::calculate_average;
use super::MIN_LOGS_FOR_RECOMMENDATIONS;

/// Mean stress at or above which stress support is suggested
const HIGH_AVERAGE_STRESS: f64 = 6.0;

/// Mean sleep hours below which sleep optimization is suggested
const LOW_AVERAGE_SLEEP: f64 = 7.0;

/// Generate recommendations
///
/// Rules:
/// - mean stress >= 6 → stress-management support (0.85)
/// - mean sleep < 7h → sleep optimization (0.8)
///
/// No reported sleep at all averages to 0 hours and therefore suggests
/// sleep optimization.
pub fn generate_recommendations(logs: &[DailyLog]) -> Vec<PatternInsight> {
    let mut recommendations = Vec::new();

    if logs.len() < MIN_LOGS_FOR_RECOMMENDATIONS {
        return recommendations;
    }

    let stress: Vec<Option<f64>> = logs.iter().map(DailyLog::stress).collect();
    let sleep: Vec<Option<f64>> = logs.iter().map(|log| log.sleep_hours).collect();
    let avg_stress = calculate_average(&stress);
    let avg_sleep = calculate_average(&sleep);

    if avg_stress >= HIGH_AVERAGE_STRESS {
        recommendations.push(
            PatternInsight::new(
                InsightType::Recommendation,
                "Consider stress management support",
                format!(
                    "Your average stress level is {:.1}/10. EFT tapping sessions can help lower cortisol and improve overall wellbeing.",
                    avg_stress
                ),
                0.85,
                true,
            )
            .with_data(InsightData::Average { value: avg_stress }),
        );
    }

    if avg_sleep < LOW_AVERAGE_SLEEP {
        recommendations.push(
            PatternInsight::new(
                InsightType::Recommendation,
                "Sleep optimization opportunity",
                format!(
                    "You're averaging {:.1} hours of sleep. Small improvements in sleep hygiene could significantly impact your energy and symptom patterns.",
                    avg_sleep
                ),
                0.8,
                true,
            )
            .with_data(InsightData::Average { value: avg_sleep }),
        );
    }

    recommendations
}

//! Pattern analysis for daily wellness logs
//!
//! Turns a user's log history into ranked insights: weekday energy trends,
//! sleep and stress correlations, cycle-phase differences, craving and
//! symptom clusters, plus recommendations from long-run averages.
//!
//! Every function here is pure and total. Missing values, empty tag sets and
//! short histories make detectors contribute nothing rather than fail.

use cyclewise_types::{DailyLog, InsightType, PatternInsight};

use crate::error::CoreError;

pub mod cravings;
pub mod energy;
pub mod phases;
pub mod recommendations;
pub mod sleep;
pub mod stats;
pub mod stress;
pub mod symptoms;


pub use cravings::detect_craving_patterns;
pub use energy::detect_energy_patterns;
pub use phases::{analyze_phase_patterns, detect_cycle_phase_patterns, PhaseSummary};
pub use recommendations::generate_recommendations;
pub use sleep::detect_sleep_impact;
pub use stats::{calculate_average, calculate_correlation, find_frequent_pairs, Correlation, FrequentPair};
pub use stress::detect_stress_patterns;
pub use symptoms::detect_symptom_clusters;

/// Logs required before any detector runs
pub const MIN_LOGS_FOR_INSIGHTS: usize = 7;

/// Logs required before recommendations are generated
pub const MIN_LOGS_FOR_RECOMMENDATIONS: usize = 14;

/// Analyze a user's logs into insights, most confident first
///
/// Below [`MIN_LOGS_FOR_INSIGHTS`] this returns a single free
/// "keep logging" recommendation. Otherwise every detector runs on the same
/// logs, recommendations are appended, and the combined list is stably
/// sorted by descending confidence (equal scores keep detector order).
/// Nothing is dropped for low confidence.
///
/// Input order does not matter; detectors that need chronology sort
/// internally. The input is never modified.
///
/// # Performance
/// Linear in the number of logs apart from the date sort. For very large
/// histories inside an async host, use [`analyze_patterns_async`].
pub fn analyze_patterns(logs: &[DailyLog]) -> Vec<PatternInsight> {
    if logs.len() < MIN_LOGS_FOR_INSIGHTS {
        tracing::debug!(logs = logs.len(), "Not enough logs for pattern analysis");
        return vec![keep_logging(logs.len())];
    }

    let mut insights = Vec::new();
    insights.extend(detect_energy_patterns(logs));
    insights.extend(detect_sleep_impact(logs));
    insights.extend(detect_stress_patterns(logs));
    insights.extend(detect_cycle_phase_patterns(logs));
    insights.extend(detect_craving_patterns(logs));
    insights.extend(detect_symptom_clusters(logs));
    insights.extend(generate_recommendations(logs));

    insights.sort_by(|a, b| b.confidence_score.total_cmp(&a.confidence_score));

    tracing::debug!(
        logs = logs.len(),
        insights = insights.len(),
        premium = insights.iter().filter(|i| i.is_premium).count(),
        "Pattern analysis complete"
    );

    insights
}

/// Run [`analyze_patterns`] on the blocking thread pool
///
/// The result corresponds exactly to the snapshot passed in.
pub async fn analyze_patterns_async(logs: Vec<DailyLog>) -> Result<Vec<PatternInsight>, CoreError> {
    tokio::task::spawn_blocking(move || analyze_patterns(&logs))
        .await
        .map_err(|source| CoreError::AnalysisTask { source })
}

/// Placeholder insight for histories below the analysis floor
fn keep_logging(count: usize) -> PatternInsight {
    PatternInsight::new(
        InsightType::Recommendation,
        "Keep logging for insights",
        format!(
            "You've logged {} day{}. After {} days, we'll start showing you personalized patterns in your data.",
            count,
            if count == 1 { "" } else { "s" },
            MIN_LOGS_FOR_INSIGHTS
        ),
        1.0,
        false,
    )
}

/// Real-valued reading, treating 0 and NaN as "not reported"
pub(crate) fn reported(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Score reading, treating 0 as "not reported"
pub(crate) fn reported_score(value: Option<u8>) -> Option<u8> {
    value.filter(|v| *v != 0)
}

/// Fraction of logs reporting at least one symptom; 0 for no logs
pub(crate) fn symptom_rate(logs: &[&DailyLog]) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }
    logs.iter().filter(|log| log.has_symptoms()).count() as f64 / logs.len() as f64
}

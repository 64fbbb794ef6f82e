//! Symptom cluster detection
//!
//! Finds symptom pairs that keep appearing together, and the single most
//! frequent symptom.

use cyclewise_types::{DailyLog, InsightData, InsightType, PatternInsight, Symptom};
use std::collections::BTreeMap;

use super::stats::find_frequent_pairs;
use super::MIN_LOGS_FOR_INSIGHTS;

/// Share of logged days a symptom needs to count as recurring
const RECURRING_SHARE: f64 = 0.3;

/// Detect co-occurring symptom pairs and the most frequent symptom
pub fn detect_symptom_clusters(logs: &[DailyLog]) -> Vec<PatternInsight> {
    let mut insights = Vec::new();

    if logs.len() < MIN_LOGS_FOR_INSIGHTS {
        return insights;
    }

    let total = logs.len() as f64;

    let groups: Vec<Vec<&str>> = logs
        .iter()
        .map(|log| log.physical_symptoms.iter().map(Symptom::as_str).collect())
        .collect();

    if let Some(top) = find_frequent_pairs(&groups).into_iter().next() {
        insights.push(
            PatternInsight::new(
                InsightType::Trend,
                "Symptom cluster detected",
                format!(
                    "{} and {} often appear together ({} times). This suggests a common underlying pattern that can be addressed holistically.",
                    humanize(&top.first),
                    humanize(&top.second),
                    top.count
                ),
                (top.count as f64 / total + 0.3).min(0.85),
                true,
            )
            .with_data(InsightData::SymptomPair {
                first: top.first,
                second: top.second,
                count: top.count,
            }),
        );
    }

    let mut counts: BTreeMap<Symptom, usize> = BTreeMap::new();
    for log in logs {
        for symptom in &log.physical_symptoms {
            *counts.entry(*symptom).or_default() += 1;
        }
    }

    // Strictly greater replaces, so ties go to vocabulary order
    let top_symptom = counts
        .into_iter()
        .fold(None, |best: Option<(Symptom, usize)>, (symptom, days)| match best {
            Some((_, best_days)) if best_days >= days => best,
            _ => Some((symptom, days)),
        });

    if let Some((symptom, days)) = top_symptom {
        if days as f64 >= total * RECURRING_SHARE {
            let share = days as f64 / total;
            insights.push(
                PatternInsight::new(
                    InsightType::Trend,
                    "Recurring symptom identified",
                    format!(
                        "{} appears on {}% of your logged days. This is worth discussing with a practitioner.",
                        humanize(symptom.as_str()),
                        (share * 100.0).round()
                    ),
                    share,
                    false,
                )
                .with_data(InsightData::RecurringSymptom { symptom, days }),
            );
        }
    }

    insights
}

/// `brain_fog` -> `brain fog`
fn humanize(tag: &str) -> String {
    tag.replacen('_', " ", 1)
}

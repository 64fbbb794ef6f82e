//! Craving pattern detection

use cyclewise_types::{Craving, CyclePhase, DailyLog, InsightData, InsightType, PatternInsight};
use std::collections::BTreeMap;

use super::stress::HIGH_STRESS;
use super::{reported_score, MIN_LOGS_FOR_INSIGHTS};

/// Luteal craving tags needed before looking for a dominant one
const MIN_LUTEAL_CRAVINGS: usize = 3;

/// Occurrences the dominant luteal craving needs
const MIN_DOMINANT_COUNT: usize = 2;

/// High-stress days needed for the stress/craving ratio
const MIN_HIGH_STRESS_DAYS: usize = 5;

/// Share of high-stress days with cravings above which it is reported
const CRAVING_SHARE_THRESHOLD: f64 = 0.5;

/// Detect phase-linked and stress-linked cravings
pub fn detect_craving_patterns(logs: &[DailyLog]) -> Vec<PatternInsight> {
    let mut insights = Vec::new();

    if logs.len() < MIN_LOGS_FOR_INSIGHTS {
        return insights;
    }

    // Craving tags per known phase; the "none" sentinel is not a craving
    let mut by_phase: BTreeMap<CyclePhase, Vec<Craving>> = BTreeMap::new();
    for log in logs {
        if let Some(phase) = log.known_phase() {
            if !log.cravings.is_empty() {
                by_phase
                    .entry(phase)
                    .or_default()
                    .extend(log.cravings.iter().copied().filter(|c| *c != Craving::None));
            }
        }
    }

    if let Some(luteal) = by_phase.get(&CyclePhase::Luteal) {
        if luteal.len() >= MIN_LUTEAL_CRAVINGS {
            if let Some((craving, count)) = most_frequent(luteal) {
                if count >= MIN_DOMINANT_COUNT {
                    insights.push(
                        PatternInsight::new(
                            InsightType::PhasePattern,
                            "Luteal phase craving pattern",
                            format!(
                                "You tend to crave {} during your luteal phase. This is common and often linked to serotonin and magnesium needs.",
                                craving
                            ),
                            0.7,
                            true,
                        )
                        .with_data(InsightData::PhaseCraving { craving, count }),
                    );
                }
            }
        }
    }

    let high_stress: Vec<&DailyLog> = logs
        .iter()
        .filter(|log| reported_score(log.stress_level).is_some_and(|s| s >= HIGH_STRESS))
        .collect();

    // A day that lists "none" anywhere does not count as a craving day
    let craving_days = high_stress
        .iter()
        .filter(|log| !log.cravings.is_empty() && !log.cravings.contains(&Craving::None))
        .count();

    if high_stress.len() >= MIN_HIGH_STRESS_DAYS {
        let share = craving_days as f64 / high_stress.len() as f64;
        if share > CRAVING_SHARE_THRESHOLD {
            insights.push(
                PatternInsight::new(
                    InsightType::Correlation,
                    "Stress triggers cravings",
                    format!(
                        "{}% of your high-stress days include cravings. Your body may be seeking quick energy or comfort.",
                        (share * 100.0).round()
                    ),
                    0.75,
                    true,
                )
                .with_data(InsightData::RateGap {
                    high_rate: share,
                    low_rate: 0.0,
                }),
            );
        }
    }

    insights
}

/// Most frequent craving; equal counts resolve to vocabulary order
fn most_frequent(cravings: &[Craving]) -> Option<(Craving, usize)> {
    let mut counts: BTreeMap<Craving, usize> = BTreeMap::new();
    for craving in cravings {
        *counts.entry(*craving).or_default() += 1;
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(Craving, usize)>, (craving, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((craving, count)),
        })
}

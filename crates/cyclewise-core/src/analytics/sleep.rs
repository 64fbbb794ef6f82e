//! Sleep impact detection
//!
//! Two signals:
//! - sleep quality vs the *next* day's energy (lagged correlation)
//! - energy on long-sleep days vs short-sleep days

use cyclewise_types::{DailyLog, InsightData, InsightType, PatternInsight};

use super::stats::{calculate_average, calculate_correlation};
use super::{reported, MIN_LOGS_FOR_INSIGHTS};

/// |r| above which the lagged correlation is reported
const LAG_CORRELATION_THRESHOLD: f64 = 0.3;

/// r above which the lagged finding is premium (positive direction only)
const LAG_PREMIUM_THRESHOLD: f64 = 0.4;

/// Hours at or above which a night counts as good sleep
const GOOD_SLEEP_HOURS: f64 = 7.0;

/// Hours below which a night counts as poor sleep
const POOR_SLEEP_HOURS: f64 = 6.0;

/// Days needed in each duration bucket
const MIN_BUCKET_DAYS: usize = 3;

/// Minimum energy gap between good and poor sleep days
const MIN_ENERGY_GAP: f64 = 1.5;

/// Detect how sleep quality and duration relate to energy
pub fn detect_sleep_impact(logs: &[DailyLog]) -> Vec<PatternInsight> {
    let mut insights = Vec::new();

    if logs.len() < MIN_LOGS_FOR_INSIGHTS {
        return insights;
    }

    let mut sorted: Vec<&DailyLog> = logs.iter().collect();
    sorted.sort_by_key(|log| log.log_date);

    // Tonight's sleep quality vs tomorrow's energy; the last day has no tomorrow
    let (sleep_quality, next_day_energy): (Vec<Option<f64>>, Vec<Option<f64>>) = sorted
        .windows(2)
        .filter_map(|pair| match (pair[0].sleep_quality_score(), pair[1].energy()) {
            (Some(quality), Some(energy)) => Some((Some(quality), Some(energy))),
            _ => None,
        })
        .unzip();

    let lagged = calculate_correlation(&sleep_quality, &next_day_energy);

    if lagged.sample_size >= 5 && lagged.coefficient.abs() > LAG_CORRELATION_THRESHOLD {
        let positive = lagged.coefficient > 0.0;
        let direction = if positive { "improves" } else { "decreases" };
        let follow_up = if positive {
            "Prioritizing quality sleep is one of your highest-leverage interventions."
        } else {
            "This unexpected pattern warrants attention."
        };

        insights.push(
            PatternInsight::new(
                InsightType::Correlation,
                "Sleep predicts tomorrow's energy",
                format!(
                    "Your sleep quality strongly {} your next-day energy (correlation: {:.2}). {}",
                    direction, lagged.coefficient, follow_up
                ),
                lagged.coefficient.abs(),
                lagged.coefficient > LAG_PREMIUM_THRESHOLD,
            )
            .with_data(InsightData::Correlation {
                coefficient: lagged.coefficient,
                p_value: lagged.p_value,
                sample_size: lagged.sample_size,
            }),
        );
    }

    let sleep_hours: Vec<Option<f64>> = sorted.iter().map(|log| log.sleep_hours).collect();
    let avg_sleep = calculate_average(&sleep_hours);

    let good_sleep: Vec<Option<f64>> = sorted
        .iter()
        .filter(|log| reported(log.sleep_hours).is_some_and(|h| h >= GOOD_SLEEP_HOURS))
        .map(|log| log.energy())
        .collect();
    let poor_sleep: Vec<Option<f64>> = sorted
        .iter()
        .filter(|log| reported(log.sleep_hours).is_some_and(|h| h < POOR_SLEEP_HOURS))
        .map(|log| log.energy())
        .collect();

    if good_sleep.len() >= MIN_BUCKET_DAYS && poor_sleep.len() >= MIN_BUCKET_DAYS {
        let good_sleep_energy = calculate_average(&good_sleep);
        let poor_sleep_energy = calculate_average(&poor_sleep);
        let energy_diff = good_sleep_energy - poor_sleep_energy;

        if energy_diff >= MIN_ENERGY_GAP {
            insights.push(
                PatternInsight::new(
                    InsightType::Correlation,
                    "Sleep duration impacts energy",
                    format!(
                        "On days with 7+ hours sleep, your average energy is {:.1}/10 vs {:.1}/10 on days with less than 6 hours. That's a {:.1} point difference.",
                        good_sleep_energy, poor_sleep_energy, energy_diff
                    ),
                    (energy_diff / 4.0).min(0.9),
                    true,
                )
                .with_data(InsightData::SleepDuration {
                    avg_sleep,
                    good_sleep_energy,
                    poor_sleep_energy,
                }),
            );
        }
    }

    insights
}

//! Day-of-week energy detection
//!
//! Groups energy scores by weekday and reports a systematic dip/peak.

use chrono::Datelike;
use cyclewise_types::{DailyLog, InsightData, InsightType, PatternInsight};

use super::MIN_LOGS_FOR_INSIGHTS;

/// Weekday names indexed Sunday-first (0 = Sunday)
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Observations a weekday needs before its mean counts
const MIN_OBSERVATIONS_PER_DAY: usize = 2;

/// Minimum gap (points on the 1-10 scale) between best and worst weekday
const MIN_WEEKDAY_GAP: f64 = 2.0;

/// Detect weekly energy dips and peaks
///
/// Weekdays are scanned in index order (Sunday..Saturday) and only a strictly
/// lower/higher mean replaces the current extreme, so ties go to the earlier
/// weekday. Confidence is `min(0.85, gap / 5)`.
pub fn detect_energy_patterns(logs: &[DailyLog]) -> Vec<PatternInsight> {
    let mut insights = Vec::new();

    if logs.len() < MIN_LOGS_FOR_INSIGHTS {
        return insights;
    }

    let mut by_weekday: [Vec<f64>; 7] = Default::default();
    for log in logs {
        if let Some(energy) = log.energy() {
            let day = log.log_date.weekday().num_days_from_sunday() as usize;
            by_weekday[day].push(energy);
        }
    }

    // Scale bounds seed the scan: a day must beat 10 to be lowest, 0 to be highest
    let mut lowest: Option<usize> = None;
    let mut lowest_avg = 10.0;
    let mut highest: Option<usize> = None;
    let mut highest_avg = 0.0;

    for (day, energies) in by_weekday.iter().enumerate() {
        if energies.len() < MIN_OBSERVATIONS_PER_DAY {
            continue;
        }
        let avg = energies.iter().sum::<f64>() / energies.len() as f64;
        if avg < lowest_avg {
            lowest_avg = avg;
            lowest = Some(day);
        }
        if avg > highest_avg {
            highest_avg = avg;
            highest = Some(day);
        }
    }

    if let (Some(low_day), Some(high_day)) = (lowest, highest) {
        let gap = highest_avg - lowest_avg;
        if low_day != high_day && gap >= MIN_WEEKDAY_GAP {
            insights.push(
                PatternInsight::new(
                    InsightType::Trend,
                    "Weekly energy pattern detected",
                    format!(
                        "Your energy is typically lowest on {}s (avg: {:.1}/10) and highest on {}s (avg: {:.1}/10).",
                        DAY_NAMES[low_day], lowest_avg, DAY_NAMES[high_day], highest_avg
                    ),
                    (gap / 5.0).min(0.85),
                    false,
                )
                .with_data(InsightData::WeeklyEnergy {
                    lowest_day: DAY_NAMES[low_day].to_string(),
                    lowest_avg,
                    highest_day: DAY_NAMES[high_day].to_string(),
                    highest_avg,
                }),
            );
        }
    }

    insights
}

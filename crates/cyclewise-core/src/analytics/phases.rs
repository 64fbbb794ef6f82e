//! Cycle-phase pattern detection
//!
//! Groups logs by reported phase and compares energy and symptom burden.

use cyclewise_types::{CyclePhase, DailyLog, InsightData, InsightType, PatternInsight};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::stats::calculate_average;
use super::symptom_rate;

/// Logs a phase needs before it is compared
pub const MIN_LOGS_PER_PHASE: usize = 3;

/// Minimum energy gap between best and worst phase
const MIN_PHASE_ENERGY_GAP: f64 = 1.5;

/// Luteal symptom-rate excess over follicular required to report
const MIN_LUTEAL_SYMPTOM_GAP: f64 = 0.2;

/// Aggregates for one cycle phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSummary {
    pub phase: CyclePhase,
    pub avg_energy: f64,
    pub avg_stress: f64,
    /// Fraction of days with at least one symptom
    pub symptom_rate: f64,
    pub count: usize,
}

/// Summarize every known phase with at least [`MIN_LOGS_PER_PHASE`] logs
///
/// Phases come back in cycle order (menstrual, follicular, ovulation, luteal).
/// Logs with an unknown or missing phase are skipped.
pub fn analyze_phase_patterns(logs: &[DailyLog]) -> Vec<PhaseSummary> {
    let mut groups: BTreeMap<CyclePhase, Vec<&DailyLog>> = BTreeMap::new();
    for log in logs {
        if let Some(phase) = log.known_phase() {
            groups.entry(phase).or_default().push(log);
        }
    }

    groups
        .into_iter()
        .filter(|(_, phase_logs)| phase_logs.len() >= MIN_LOGS_PER_PHASE)
        .map(|(phase, phase_logs)| {
            let energy: Vec<Option<f64>> = phase_logs.iter().map(|log| log.energy()).collect();
            let stress: Vec<Option<f64>> = phase_logs.iter().map(|log| log.stress()).collect();
            PhaseSummary {
                phase,
                avg_energy: calculate_average(&energy),
                avg_stress: calculate_average(&stress),
                symptom_rate: symptom_rate(&phase_logs),
                count: phase_logs.len(),
            }
        })
        .collect()
}

/// Detect energy swings and luteal symptom burden across phases
///
/// When several phases share the highest or lowest energy average, the tie
/// goes to the phase that comes first in cycle order, not the one that shows
/// up first in `logs`.
pub fn detect_cycle_phase_patterns(logs: &[DailyLog]) -> Vec<PatternInsight> {
    let mut insights = Vec::new();

    let phases = analyze_phase_patterns(logs);
    if phases.len() < 2 {
        return insights;
    }

    // Stable sort: equal averages keep cycle order
    let mut by_energy: Vec<&PhaseSummary> = phases.iter().collect();
    by_energy.sort_by(|a, b| b.avg_energy.total_cmp(&a.avg_energy));

    if let (Some(highest), Some(lowest)) = (by_energy.first(), by_energy.last()) {
        if highest.avg_energy - lowest.avg_energy >= MIN_PHASE_ENERGY_GAP {
            insights.push(
                PatternInsight::new(
                    InsightType::PhasePattern,
                    "Energy varies by cycle phase",
                    format!(
                        "Your energy is highest during {} phase ({:.1}/10) and lowest during {} phase ({:.1}/10). Plan important activities accordingly.",
                        highest.phase, highest.avg_energy, lowest.phase, lowest.avg_energy
                    ),
                    0.8,
                    false,
                )
                .with_data(InsightData::PhaseEnergy {
                    highest_phase: highest.phase,
                    highest_avg: highest.avg_energy,
                    lowest_phase: lowest.phase,
                    lowest_avg: lowest.avg_energy,
                }),
            );
        }
    }

    let luteal = phases.iter().find(|p| p.phase == CyclePhase::Luteal);
    let follicular = phases.iter().find(|p| p.phase == CyclePhase::Follicular);

    if let (Some(luteal), Some(follicular)) = (luteal, follicular) {
        if luteal.symptom_rate > follicular.symptom_rate + MIN_LUTEAL_SYMPTOM_GAP {
            insights.push(
                PatternInsight::new(
                    InsightType::PhasePattern,
                    "Luteal phase symptoms detected",
                    format!(
                        "Physical symptoms are {}% more common in your luteal phase. This is hormonally normal and manageable with the right support.",
                        ((luteal.symptom_rate - follicular.symptom_rate) * 100.0).round()
                    ),
                    0.75,
                    true,
                )
                .with_data(InsightData::RateGap {
                    high_rate: luteal.symptom_rate,
                    low_rate: follicular.symptom_rate,
                }),
            );
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cyclewise_types::Symptom;

    fn phase_log(i: i64, phase: Option<CyclePhase>, energy: u8) -> DailyLog {
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap() + chrono::Duration::days(i);
        let mut log = DailyLog::new("demo", date);
        log.cycle_phase = phase;
        log.energy_level = Some(energy);
        log.stress_level = Some(4);
        log
    }

    #[test]
    fn test_phase_summary_skips_unknown_and_small_groups() {
        let mut logs = vec![
            phase_log(0, Some(CyclePhase::Unknown), 5),
            phase_log(1, None, 5),
            phase_log(2, Some(CyclePhase::Menstrual), 3),
            phase_log(3, Some(CyclePhase::Menstrual), 4),
        ];
        for i in 4..7 {
            logs.push(phase_log(i, Some(CyclePhase::Ovulation), 9));
        }

        let phases = analyze_phase_patterns(&logs);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].phase, CyclePhase::Ovulation);
        assert_eq!(phases[0].count, 3);
        assert_eq!(phases[0].avg_energy, 9.0);
        assert_eq!(phases[0].avg_stress, 4.0);
        assert_eq!(phases[0].symptom_rate, 0.0);
    }

    #[test]
    fn test_energy_gap_between_phases() {
        let mut logs = Vec::new();
        for i in 0..3 {
            logs.push(phase_log(i, Some(CyclePhase::Menstrual), 3));
            logs.push(phase_log(i + 10, Some(CyclePhase::Ovulation), 8));
            logs.push(phase_log(i + 20, Some(CyclePhase::Follicular), 6));
        }

        let insights = detect_cycle_phase_patterns(&logs);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].confidence_score, 0.8);
        assert!(!insights[0].is_premium);
        assert!(insights[0]
            .description
            .starts_with("Your energy is highest during ovulation phase (8.0/10) and lowest during menstrual phase (3.0/10)."));
    }

    #[test]
    fn test_energy_ties_follow_cycle_order() {
        let mut logs = Vec::new();
        for i in 0..3 {
            logs.push(phase_log(i, Some(CyclePhase::Luteal), 8));
        }
        for i in 3..6 {
            logs.push(phase_log(i, Some(CyclePhase::Follicular), 8));
            logs.push(phase_log(i + 10, Some(CyclePhase::Menstrual), 3));
        }

        let insights = detect_cycle_phase_patterns(&logs);
        match &insights[0].data {
            Some(InsightData::PhaseEnergy { highest_phase, lowest_phase, .. }) => {
                assert_eq!(*highest_phase, CyclePhase::Follicular);
                assert_eq!(*lowest_phase, CyclePhase::Menstrual);
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_luteal_symptom_burden() {
        let mut logs = Vec::new();
        for i in 0..5 {
            let mut luteal = phase_log(i, Some(CyclePhase::Luteal), 5);
            if i < 4 {
                luteal.physical_symptoms.insert(Symptom::Bloating);
            }
            logs.push(luteal);
            logs.push(phase_log(i + 10, Some(CyclePhase::Follicular), 5));
        }

        let insights = detect_cycle_phase_patterns(&logs);
        assert_eq!(insights.len(), 1, "energy is flat across phases");
        assert_eq!(insights[0].title, "Luteal phase symptoms detected");
        assert_eq!(insights[0].confidence_score, 0.75);
        assert!(insights[0].is_premium);
        assert!(insights[0].description.contains("80% more common"));
    }

    #[test]
    fn test_single_phase_is_silent() {
        let logs: Vec<_> = (0..8)
            .map(|i| phase_log(i, Some(CyclePhase::Luteal), (i + 1) as u8))
            .collect();
        assert!(detect_cycle_phase_patterns(&logs).is_empty());
    }
}

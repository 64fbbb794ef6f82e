//! Validation of user-entered logs
//!
//! Entry points accept a loosely typed [`LogDraft`] (raw tag strings,
//! optional scores) and turn it into a [`DailyLog`] or a
//! [`CoreError::InvalidLog`] naming the offending field.

use chrono::NaiveDate;
use cyclewise_types::{Craving, CyclePhase, DailyLog};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::CoreError;

/// Longest plausible sleep for one night
const MAX_SLEEP_HOURS: f64 = 24.0;

/// Unvalidated log input, as submitted by a form or the CLI
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogDraft {
    pub log_date: Option<NaiveDate>,
    pub energy_level: Option<u8>,
    pub sleep_quality: Option<u8>,
    pub stress_level: Option<u8>,
    pub sleep_hours: Option<f64>,
    pub mood: Vec<String>,
    pub physical_symptoms: Vec<String>,
    pub cravings: Vec<String>,
    pub cycle_phase: Option<String>,
    pub cycle_day: Option<u8>,
    pub notes: Option<String>,
}

/// Validate a draft into a log for `user_id`
///
/// `today` is used when the draft carries no date. Rejects scores outside
/// 1-10, sleep hours that are negative, non-finite or above 24, unknown tags,
/// and a `none` craving combined with real cravings. Repeated tags collapse.
pub fn validate_draft(draft: LogDraft, user_id: &str, today: NaiveDate) -> Result<DailyLog, CoreError> {
    let mut log = DailyLog::new(user_id, draft.log_date.unwrap_or(today));

    log.energy_level = check_score("energy_level", draft.energy_level)?;
    log.sleep_quality = check_score("sleep_quality", draft.sleep_quality)?;
    log.stress_level = check_score("stress_level", draft.stress_level)?;
    log.sleep_hours = check_sleep_hours(draft.sleep_hours)?;

    log.mood = parse_tags("mood", &draft.mood)?;
    log.physical_symptoms = parse_tags("physical_symptoms", &draft.physical_symptoms)?;
    log.cravings = parse_tags("cravings", &draft.cravings)?;
    if log.cravings.contains(&Craving::None) && log.cravings.len() > 1 {
        return Err(CoreError::invalid(
            "cravings",
            "'none' cannot be combined with other cravings",
        ));
    }

    log.cycle_phase = draft
        .cycle_phase
        .as_deref()
        .map(CyclePhase::from_str)
        .transpose()
        .map_err(|e| CoreError::invalid("cycle_phase", e.to_string()))?;

    if draft.cycle_day == Some(0) {
        return Err(CoreError::invalid("cycle_day", "cycle days start at 1"));
    }
    log.cycle_day = draft.cycle_day;

    log.notes = draft
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(log)
}

fn check_score(field: &'static str, value: Option<u8>) -> Result<Option<u8>, CoreError> {
    match value {
        Some(v) if !(1..=10).contains(&v) => {
            Err(CoreError::invalid(field, format!("{} is outside 1-10", v)))
        }
        other => Ok(other),
    }
}

fn check_sleep_hours(value: Option<f64>) -> Result<Option<f64>, CoreError> {
    match value {
        Some(h) if !h.is_finite() || h < 0.0 || h > MAX_SLEEP_HOURS => Err(CoreError::invalid(
            "sleep_hours",
            format!("{} is not between 0 and {} hours", h, MAX_SLEEP_HOURS),
        )),
        other => Ok(other),
    }
}

fn parse_tags<T>(field: &'static str, raw: &[String]) -> Result<BTreeSet<T>, CoreError>
where
    T: FromStr + Ord,
    T::Err: std::fmt::Display,
{
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| T::from_str(s).map_err(|e| CoreError::invalid(field, e.to_string())))
        .collect()
}

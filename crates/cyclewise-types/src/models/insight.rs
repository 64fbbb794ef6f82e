//! Pattern insights produced by the analyzer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::log::{Craving, CyclePhase, Symptom};

/// Closed set of insight categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Correlation,
    Trend,
    PhasePattern,
    Recommendation,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correlation => "correlation",
            Self::Trend => "trend",
            Self::PhasePattern => "phase_pattern",
            Self::Recommendation => "recommendation",
        }
    }

    /// Icon for terminal display
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Correlation => "📈",
            Self::Trend => "📅",
            Self::PhasePattern => "🌙",
            Self::Recommendation => "⚡",
        }
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Figures a detector computed alongside its insight
///
/// One variant per detector finding, so consumers get typed fields instead
/// of an untyped map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InsightData {
    /// Weekday energy extremes (day names are Sunday-first)
    WeeklyEnergy {
        lowest_day: String,
        lowest_avg: f64,
        highest_day: String,
        highest_avg: f64,
    },
    /// Pearson result behind a correlation insight
    Correlation {
        coefficient: f64,
        p_value: f64,
        sample_size: usize,
    },
    /// Energy by sleep-duration bucket
    SleepDuration {
        avg_sleep: f64,
        good_sleep_energy: f64,
        poor_sleep_energy: f64,
    },
    /// Fraction of days with symptoms (or cravings) in two groups
    RateGap { high_rate: f64, low_rate: f64 },
    /// Phase energy extremes
    PhaseEnergy {
        highest_phase: CyclePhase,
        highest_avg: f64,
        lowest_phase: CyclePhase,
        lowest_avg: f64,
    },
    /// Dominant luteal craving
    PhaseCraving { craving: Craving, count: usize },
    /// Most frequent co-occurring symptom pair
    SymptomPair {
        first: String,
        second: String,
        count: usize,
    },
    /// Most frequent single symptom
    RecurringSymptom { symptom: Symptom, days: usize },
    /// Aggregate average behind a recommendation
    Average { value: f64 },
}

/// One derived statement about a user's log history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternInsight {
    pub insight_type: InsightType,
    pub title: String,
    pub description: String,
    /// Heuristic strength of signal in [0, 1], not a calibrated probability
    pub confidence_score: f64,
    /// Shown only to entitled users
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<InsightData>,
}

impl PatternInsight {
    pub fn new(
        insight_type: InsightType,
        title: impl Into<String>,
        description: impl Into<String>,
        confidence_score: f64,
        is_premium: bool,
    ) -> Self {
        Self {
            insight_type,
            title: title.into(),
            description: description.into(),
            confidence_score,
            is_premium,
            data: None,
        }
    }

    /// Attach computed figures
    pub fn with_data(mut self, data: InsightData) -> Self {
        self.data = Some(data);
        self
    }
}

/// Insight as persisted by a store, stamped with ownership and validity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecord {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub insight: PatternInsight,
    /// Earliest log date the analysis covered
    pub valid_from: Option<NaiveDate>,
    /// Latest log date the analysis covered
    pub valid_to: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

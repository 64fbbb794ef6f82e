//! Daily wellness log and its tag vocabularies

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a tag that is not in its vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownTag {}

/// Declares a closed tag vocabulary with its wire names and display labels.
///
/// Variant order is the `Ord` order, which analyzers rely on to break ties.
macro_rules! tag_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every tag in vocabulary order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name (snake_case)
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Human label shown in forms and tables
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|tag| tag.as_str() == needle)
                    .ok_or_else(|| UnknownTag {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

tag_vocabulary! {
    /// Mood tags (recorded, not analyzed)
    Mood, "mood" {
        Calm => ("calm", "Calm"),
        Happy => ("happy", "Happy"),
        Energetic => ("energetic", "Energetic"),
        Anxious => ("anxious", "Anxious"),
        Irritable => ("irritable", "Irritable"),
        Sad => ("sad", "Sad"),
        Tired => ("tired", "Tired"),
        Focused => ("focused", "Focused"),
    }
}

tag_vocabulary! {
    /// Physical symptom tags
    Symptom, "symptom" {
        Bloating => ("bloating", "Bloating"),
        BrainFog => ("brain_fog", "Brain Fog"),
        Headache => ("headache", "Headache"),
        NightSweats => ("night_sweats", "Night Sweats"),
        Fatigue => ("fatigue", "Fatigue"),
        Cramps => ("cramps", "Cramps"),
        BreastTenderness => ("breast_tenderness", "Breast Tenderness"),
        JointPain => ("joint_pain", "Joint Pain"),
        HotFlashes => ("hot_flashes", "Hot Flashes"),
        Insomnia => ("insomnia", "Insomnia"),
    }
}

tag_vocabulary! {
    /// Craving tags. `None` means "explicitly no cravings".
    Craving, "craving" {
        Sugar => ("sugar", "Sugar/Sweets"),
        Carbs => ("carbs", "Carbs/Bread"),
        Salt => ("salt", "Salty Foods"),
        Chocolate => ("chocolate", "Chocolate"),
        Dairy => ("dairy", "Dairy"),
        None => ("none", "No Cravings"),
    }
}

tag_vocabulary! {
    /// Self-reported menstrual cycle phase
    CyclePhase, "cycle phase" {
        Menstrual => ("menstrual", "Menstrual (Days 1-5)"),
        Follicular => ("follicular", "Follicular (Days 6-14)"),
        Ovulation => ("ovulation", "Ovulation (Days 15-17)"),
        Luteal => ("luteal", "Luteal (Days 18-28)"),
        Unknown => ("unknown", "Not Sure"),
    }
}

impl CyclePhase {
    /// True for the four real phases; `Unknown` is excluded from phase grouping
    pub fn is_known(&self) -> bool {
        !matches!(self, CyclePhase::Unknown)
    }
}

/// One user's self-reported wellness record for a single calendar day
///
/// Scores are 1-10 when present; `None` means "not reported".
/// Tag collections are sets: order is irrelevant and duplicates collapse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    /// Store-assigned identifier (`log-<date>`)
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    /// Calendar day, unique per user
    pub log_date: NaiveDate,
    #[serde(default)]
    pub energy_level: Option<u8>,
    #[serde(default)]
    pub sleep_quality: Option<u8>,
    #[serde(default)]
    pub stress_level: Option<u8>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub mood: BTreeSet<Mood>,
    #[serde(default)]
    pub physical_symptoms: BTreeSet<Symptom>,
    #[serde(default)]
    pub cravings: BTreeSet<Craving>,
    #[serde(default)]
    pub cycle_phase: Option<CyclePhase>,
    #[serde(default)]
    pub cycle_day: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DailyLog {
    /// Empty log for a day: nothing reported yet
    pub fn new(user_id: impl Into<String>, log_date: NaiveDate) -> Self {
        Self {
            id: format!("log-{}", log_date.format("%Y-%m-%d")),
            user_id: user_id.into(),
            log_date,
            energy_level: None,
            sleep_quality: None,
            stress_level: None,
            sleep_hours: None,
            mood: BTreeSet::new(),
            physical_symptoms: BTreeSet::new(),
            cravings: BTreeSet::new(),
            cycle_phase: None,
            cycle_day: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Phase if reported and not `Unknown`
    pub fn known_phase(&self) -> Option<CyclePhase> {
        self.cycle_phase.filter(CyclePhase::is_known)
    }

    /// True if at least one physical symptom was reported
    pub fn has_symptoms(&self) -> bool {
        !self.physical_symptoms.is_empty()
    }

    pub fn energy(&self) -> Option<f64> {
        self.energy_level.map(f64::from)
    }

    pub fn stress(&self) -> Option<f64> {
        self.stress_level.map(f64::from)
    }

    pub fn sleep_quality_score(&self) -> Option<f64> {
        self.sleep_quality.map(f64::from)
    }
}

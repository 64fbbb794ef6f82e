//! Data models for daily logs, derived insights and user profiles

pub mod insight;
pub mod log;
pub mod profile;

pub use insight::{InsightData, InsightRecord, InsightType, PatternInsight};
pub use log::{Craving, CyclePhase, DailyLog, Mood, Symptom, UnknownTag};
pub use profile::{Profile, SubscriptionStatus};

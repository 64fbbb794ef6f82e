//! cyclewise-types - Shared data types for cyclewise
//!
//! This crate contains pure data structures without heavy dependencies.
//! No tokio, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - cyclewise-core (analyzer, store, validation)
//! - cyclewise (CLI)

pub mod models;

pub use models::{
    Craving, CyclePhase, DailyLog, InsightData, InsightRecord, InsightType, Mood, PatternInsight,
    Profile, SubscriptionStatus, Symptom, UnknownTag,
};

//! cyclewise-core - Core library for cyclewise
//!
//! Provides the pattern analyzer, log stores, validation, presentation and
//! export for daily wellness logs.

pub mod analytics;
pub mod error;
pub mod export;
pub mod presentation;
pub mod profile;
pub mod store;
pub mod validation;

pub use cyclewise_types as models;

pub use analytics::{analyze_patterns, analyze_patterns_async};
pub use error::CoreError;
pub use export::{export_insights_to_json, export_logs_to_csv};
pub use presentation::{partition_insights, present_insight, InsightSummary, PresentedInsight};
pub use profile::{load_profile, save_profile, ProfileUpdate};
pub use store::{refresh_insights, JsonFileStore, LogStore, MemoryLogStore, StoreConfig};
pub use validation::{validate_draft, LogDraft};

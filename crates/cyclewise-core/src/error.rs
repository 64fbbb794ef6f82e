//! Error types for cyclewise-core
//!
//! The analyzer is total and never returns these. They cover the
//! collaborators around it: file-backed storage, validation, task offloading.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cyclewise operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize {what}")]
    JsonSerialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Store Errors
    // ===================
    #[error("No log for {user_id} on {date}")]
    LogNotFound { user_id: String, date: NaiveDate },

    // ===================
    // Validation Errors
    // ===================
    #[error("Invalid {field}: {reason}")]
    InvalidLog { field: &'static str, reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ===================
    // Task Errors
    // ===================
    #[error("Pattern analysis task failed")]
    AnalysisTask {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl CoreError {
    /// Shorthand for a validation failure
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidLog {
            field,
            reason: reason.into(),
        }
    }

    /// Actionable hint for the terminal, when one exists
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::FileRead { path, .. } => {
                Some(format!("Check permissions: chmod +r {}", path.display()))
            }
            CoreError::JsonParse { path, .. } => Some(format!(
                "Validate JSON syntax with: jq . {}",
                path.display()
            )),
            CoreError::LogNotFound { .. } => {
                Some("List logged days with: cyclewise history".to_string())
            }
            CoreError::InvalidLog { field, .. } if field.ends_with("level") || *field == "sleep_quality" => {
                Some("Scores use a 1-10 scale".to_string())
            }
            _ => None,
        }
    }
}

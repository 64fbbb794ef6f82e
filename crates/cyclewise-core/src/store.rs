//! Log storage behind a pluggable trait
//!
//! The analyzer never touches storage. Stores supply a user's logs and keep
//! the insights computed from them. Two implementations:
//! - [`MemoryLogStore`]: DashMap for per-user logs (per-entry locking) and a
//!   parking_lot::RwLock for the insight cache
//! - [`JsonFileStore`]: one JSON document per user and collection

use chrono::{DateTime, Duration, NaiveDate, Utc};
use cyclewise_types::{DailyLog, InsightRecord};
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::analytics::analyze_patterns;
use crate::error::CoreError;

/// Configuration for log storage and analysis scope
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for file-backed stores
    pub data_dir: PathBuf,

    /// Maximum logs returned by history listings
    pub history_limit: usize,

    /// Only analyze logs from the last N days (None = everything stored)
    pub analysis_window_days: Option<u32>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".cyclewise"),
            history_limit: 60,
            analysis_window_days: None,
        }
    }
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.history_limit == 0 {
            return Err(CoreError::InvalidConfig {
                message: "history limit must be at least 1".to_string(),
            });
        }
        if self.analysis_window_days == Some(0) {
            return Err(CoreError::InvalidConfig {
                message: "analysis window must be at least 1 day".to_string(),
            });
        }
        Ok(())
    }

    /// Directory holding one user's documents
    ///
    /// Rejects ids that would resolve outside `<data_dir>/users`.
    pub fn user_dir(&self, user_id: &str) -> Result<PathBuf, CoreError> {
        if user_id.is_empty()
            || user_id.contains(['/', '\\'])
            || user_id == "."
            || user_id == ".."
        {
            return Err(CoreError::invalid(
                "user_id",
                format!("'{}' cannot be used as a directory name", user_id),
            ));
        }
        Ok(self.data_dir.join("users").join(user_id))
    }
}

/// Storage collaborator for logs and computed insights
///
/// Implementations keep at most one log per `(user, log_date)` and return
/// logs newest first.
pub trait LogStore: Send + Sync {
    /// All logs for a user, newest first
    fn logs_for(&self, user_id: &str) -> Result<Vec<DailyLog>, CoreError>;

    /// Insert or replace the log for `log.log_date`
    ///
    /// A replaced log keeps its id and `created_at`; `updated_at` becomes `now`.
    /// Any cached insights for the user are dropped.
    fn upsert_log(&self, log: DailyLog, now: DateTime<Utc>) -> Result<DailyLog, CoreError>;

    /// Remove and return the log for a day, dropping cached insights
    fn delete_log(&self, user_id: &str, date: NaiveDate) -> Result<DailyLog, CoreError>;

    /// Replace the cached insights for a user
    fn save_insights(&self, user_id: &str, insights: &[InsightRecord]) -> Result<(), CoreError>;

    /// Insights saved by the last refresh, empty once the logs have changed
    fn insights_for(&self, user_id: &str) -> Result<Vec<InsightRecord>, CoreError>;

    /// Logs with `from <= log_date <= to`, newest first
    fn logs_between(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyLog>, CoreError> {
        Ok(self
            .logs_for(user_id)?
            .into_iter()
            .filter(|log| log.log_date >= from && log.log_date <= to)
            .collect())
    }

    /// The newest `limit` logs
    fn recent_logs(&self, user_id: &str, limit: usize) -> Result<Vec<DailyLog>, CoreError> {
        let mut logs = self.logs_for(user_id)?;
        logs.truncate(limit);
        Ok(logs)
    }

    fn get_log(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyLog>, CoreError> {
        Ok(self
            .logs_for(user_id)?
            .into_iter()
            .find(|log| log.log_date == date))
    }
}

/// Apply upsert semantics to a user's log list, keeping it newest first
fn merge_log(logs: &mut Vec<DailyLog>, mut incoming: DailyLog, now: DateTime<Utc>) -> DailyLog {
    incoming.updated_at = Some(now);

    if let Some(existing) = logs.iter_mut().find(|l| l.log_date == incoming.log_date) {
        incoming.id = existing.id.clone();
        incoming.created_at = existing.created_at.or(Some(now));
        *existing = incoming.clone();
        return incoming;
    }

    if incoming.id.is_empty() {
        incoming.id = format!("log-{}", incoming.log_date.format("%Y-%m-%d"));
    }
    incoming.created_at = incoming.created_at.or(Some(now));
    logs.push(incoming.clone());
    logs.sort_by(|a, b| b.log_date.cmp(&a.log_date));
    incoming
}

/// Remove the log for `date`, or report it missing
fn remove_log(logs: &mut Vec<DailyLog>, user_id: &str, date: NaiveDate) -> Result<DailyLog, CoreError> {
    let index = logs
        .iter()
        .position(|l| l.log_date == date)
        .ok_or_else(|| CoreError::LogNotFound {
            user_id: user_id.to_string(),
            date,
        })?;
    Ok(logs.remove(index))
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local store, used for embedding and tests
#[derive(Default)]
pub struct MemoryLogStore {
    /// Logs per user (newest first)
    logs: DashMap<String, Vec<DailyLog>>,

    /// Insight cache per user
    insights: RwLock<HashMap<String, Vec<InsightRecord>>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with at least one log
    pub fn user_count(&self) -> usize {
        self.logs.iter().filter(|entry| !entry.value().is_empty()).count()
    }
}

impl LogStore for MemoryLogStore {
    fn logs_for(&self, user_id: &str) -> Result<Vec<DailyLog>, CoreError> {
        Ok(self
            .logs
            .get(user_id)
            .map(|logs| logs.value().clone())
            .unwrap_or_default())
    }

    fn upsert_log(&self, log: DailyLog, now: DateTime<Utc>) -> Result<DailyLog, CoreError> {
        let saved = {
            let mut logs = self.logs.entry(log.user_id.clone()).or_default();
            merge_log(&mut logs, log, now)
        };
        self.insights.write().remove(&saved.user_id);
        Ok(saved)
    }

    fn delete_log(&self, user_id: &str, date: NaiveDate) -> Result<DailyLog, CoreError> {
        let removed = match self.logs.get_mut(user_id) {
            Some(mut logs) => remove_log(&mut logs, user_id, date)?,
            None => {
                return Err(CoreError::LogNotFound {
                    user_id: user_id.to_string(),
                    date,
                })
            }
        };
        self.insights.write().remove(user_id);
        Ok(removed)
    }

    fn save_insights(&self, user_id: &str, insights: &[InsightRecord]) -> Result<(), CoreError> {
        self.insights
            .write()
            .insert(user_id.to_string(), insights.to_vec());
        Ok(())
    }

    fn insights_for(&self, user_id: &str) -> Result<Vec<InsightRecord>, CoreError> {
        Ok(self
            .insights
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

const LOGS_FILE: &str = "logs.json";
const INSIGHTS_FILE: &str = "insights.json";

/// File-backed store: `<data_dir>/users/<user>/{logs,insights}.json`
///
/// Missing files read as empty collections. Corrupt files are errors, so a
/// write never silently replaces data that failed to parse.
pub struct JsonFileStore {
    config: StoreConfig,

    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(config: StoreConfig) -> Result<Self, CoreError> {
        config.validate()?;
        debug!(data_dir = %config.data_dir.display(), "Opening JSON file store");
        Ok(Self {
            config,
            write_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn user_file(&self, user_id: &str, file: &str) -> Result<PathBuf, CoreError> {
        Ok(self.config.user_dir(user_id)?.join(file))
    }

    /// Drop cached insights; they describe logs that no longer exist
    fn invalidate_insights(&self, user_id: &str) -> Result<(), CoreError> {
        let path = self.user_file(user_id, INSIGHTS_FILE)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(user_id, "Insight cache invalidated");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CoreError::FileWrite { path, source }),
        }
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, CoreError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let content = std::fs::read_to_string(path).map_err(|source| CoreError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if content.trim().is_empty() {
        warn!(path = %path.display(), "Empty store file, treating as no data");
        return Ok(T::default());
    }

    serde_json::from_str(&content).map_err(|source| CoreError::JsonParse {
        path: path.to_path_buf(),
        message: source.to_string(),
        source,
    })
}

/// Write via a sibling temp file and rename, so readers never see half a file
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, what: &'static str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CoreError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let content = serde_json::to_string_pretty(value)
        .map_err(|source| CoreError::JsonSerialize { what, source })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content).map_err(|source| CoreError::FileWrite {
        path: tmp.clone(),
        source,
    })?;
    std::fs::rename(&tmp, path).map_err(|source| CoreError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

impl LogStore for JsonFileStore {
    fn logs_for(&self, user_id: &str) -> Result<Vec<DailyLog>, CoreError> {
        let path = self.user_file(user_id, LOGS_FILE)?;
        let mut logs: Vec<DailyLog> = read_json(&path)?;
        logs.sort_by(|a, b| b.log_date.cmp(&a.log_date));
        debug!(user_id, count = logs.len(), "Logs loaded");
        Ok(logs)
    }

    fn upsert_log(&self, log: DailyLog, now: DateTime<Utc>) -> Result<DailyLog, CoreError> {
        let path = self.user_file(&log.user_id, LOGS_FILE)?;
        let _guard = self.write_lock.lock();

        let mut logs: Vec<DailyLog> = read_json(&path)?;
        let saved = merge_log(&mut logs, log, now);
        write_json(&path, &logs, "logs")?;
        self.invalidate_insights(&saved.user_id)?;

        debug!(user_id = %saved.user_id, date = %saved.log_date, "Log saved");
        Ok(saved)
    }

    fn delete_log(&self, user_id: &str, date: NaiveDate) -> Result<DailyLog, CoreError> {
        let path = self.user_file(user_id, LOGS_FILE)?;
        let _guard = self.write_lock.lock();

        let mut logs: Vec<DailyLog> = read_json(&path)?;
        let removed = remove_log(&mut logs, user_id, date)?;
        write_json(&path, &logs, "logs")?;
        self.invalidate_insights(user_id)?;

        debug!(user_id, %date, "Log deleted");
        Ok(removed)
    }

    fn save_insights(&self, user_id: &str, insights: &[InsightRecord]) -> Result<(), CoreError> {
        let path = self.user_file(user_id, INSIGHTS_FILE)?;
        let _guard = self.write_lock.lock();
        write_json(&path, insights, "insights")
    }

    fn insights_for(&self, user_id: &str) -> Result<Vec<InsightRecord>, CoreError> {
        let path = self.user_file(user_id, INSIGHTS_FILE)?;
        read_json(&path)
    }
}

// ============================================================================
// Analysis over a store
// ============================================================================

/// Logs inside the analysis window ending at `today` (all logs if no window)
pub fn logs_for_analysis(
    store: &dyn LogStore,
    user_id: &str,
    window_days: Option<u32>,
    today: NaiveDate,
) -> Result<Vec<DailyLog>, CoreError> {
    match window_days {
        Some(days) => store.logs_between(user_id, window_start(today, days), today),
        None => store.logs_for(user_id),
    }
}

/// First day of a `days`-long window ending at `today`, clamped to the
/// earliest representable date
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    Duration::try_days(i64::from(days).saturating_sub(1).max(0))
        .and_then(|back| today.checked_sub_signed(back))
        .unwrap_or(NaiveDate::MIN)
}

/// Re-run the analyzer for a user and persist the stamped results
///
/// Records are numbered in rank order and carry the date span analyzed.
pub fn refresh_insights(
    store: &dyn LogStore,
    user_id: &str,
    window_days: Option<u32>,
    now: DateTime<Utc>,
) -> Result<Vec<InsightRecord>, CoreError> {
    let logs = logs_for_analysis(store, user_id, window_days, now.date_naive())?;
    let valid_from = logs.iter().map(|log| log.log_date).min();
    let valid_to = logs.iter().map(|log| log.log_date).max();

    let records: Vec<InsightRecord> = analyze_patterns(&logs)
        .into_iter()
        .enumerate()
        .map(|(i, insight)| InsightRecord {
            id: format!("insight-{}", i + 1),
            user_id: user_id.to_string(),
            insight,
            valid_from,
            valid_to,
            created_at: now,
        })
        .collect();

    store.save_insights(user_id, &records)?;

    info!(
        user_id,
        logs = logs.len(),
        insights = records.len(),
        "Insights refreshed"
    );

    Ok(records)
}

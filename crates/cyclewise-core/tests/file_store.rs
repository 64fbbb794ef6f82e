//! Integration tests for the JSON file store

use chrono::{NaiveDate, TimeZone, Utc};
use cyclewise_core::models::DailyLog;
use cyclewise_core::store::{refresh_insights, JsonFileStore, LogStore, StoreConfig};
use cyclewise_core::CoreError;
use tempfile::tempdir;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, day).unwrap()
}

fn open(dir: &std::path::Path) -> JsonFileStore {
    JsonFileStore::new(StoreConfig::new(dir)).unwrap()
}

#[test]
fn test_missing_files_read_empty() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    assert!(store.logs_for("demo").unwrap().is_empty());
    assert!(store.insights_for("demo").unwrap().is_empty());
}

#[test]
fn test_logs_survive_reopen() {
    let dir = tempdir().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 7, 20, 8, 0, 0).unwrap();

    {
        let store = open(dir.path());
        for day in [3, 1, 2] {
            let mut log = DailyLog::new("demo", date(day));
            log.energy_level = Some(day as u8 + 4);
            store.upsert_log(log, now).unwrap();
        }
    }

    let store = open(dir.path());
    let logs = store.logs_for("demo").unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].log_date, date(3), "newest first");
    assert_eq!(
        store.get_log("demo", date(2)).unwrap().and_then(|l| l.energy_level),
        Some(6)
    );
    assert!(dir.path().join("users/demo/logs.json").exists());
}

#[test]
fn test_upsert_and_delete_roundtrip() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let first = Utc.with_ymd_and_hms(2026, 7, 20, 8, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2026, 7, 20, 21, 0, 0).unwrap();

    store.upsert_log(DailyLog::new("demo", date(5)), first).unwrap();
    let mut edit = DailyLog::new("demo", date(5));
    edit.stress_level = Some(9);
    store.upsert_log(edit, later).unwrap();

    let logs = store.logs_for("demo").unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].stress_level, Some(9));
    assert_eq!(logs[0].created_at, Some(first));
    assert_eq!(logs[0].updated_at, Some(later));

    store.delete_log("demo", date(5)).unwrap();
    assert!(store.logs_for("demo").unwrap().is_empty());
    assert!(matches!(
        store.delete_log("demo", date(5)),
        Err(CoreError::LogNotFound { .. })
    ));
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempdir().unwrap();
    let user_dir = dir.path().join("users").join("demo");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("logs.json"), "[{ broken").unwrap();

    let store = open(dir.path());
    let err = store.logs_for("demo").unwrap_err();
    assert!(matches!(err, CoreError::JsonParse { .. }));
    assert!(err.suggestion().is_some());

    // Writes must not clobber the unreadable file
    let now = Utc.with_ymd_and_hms(2026, 7, 20, 8, 0, 0).unwrap();
    assert!(store.upsert_log(DailyLog::new("demo", date(1)), now).is_err());
    assert_eq!(
        std::fs::read_to_string(user_dir.join("logs.json")).unwrap(),
        "[{ broken"
    );
}

#[test]
fn test_rejects_path_like_user_ids() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());

    for user in ["", "..", "a/b"] {
        assert!(store.logs_for(user).is_err(), "{:?} accepted", user);
    }
}

#[test]
fn test_refresh_persists_insights() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let now = Utc.with_ymd_and_hms(2026, 7, 30, 8, 0, 0).unwrap();

    for day in 1..=14 {
        let mut log = DailyLog::new("demo", date(day));
        log.stress_level = Some(8);
        log.sleep_hours = Some(5.0);
        store.upsert_log(log, now).unwrap();
    }

    let records = refresh_insights(&store, "demo", None, now).unwrap();
    assert!(records.len() >= 2);
    assert_eq!(records[0].insight.title, "Consider stress management support");
    assert_eq!(records[0].valid_from, Some(date(1)));
    assert_eq!(records[0].valid_to, Some(date(14)));

    let reloaded = open(dir.path()).insights_for("demo").unwrap();
    assert_eq!(reloaded, records);
}

#[test]
fn test_analysis_window_limits_logs() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let now = Utc.with_ymd_and_hms(2026, 7, 30, 8, 0, 0).unwrap();

    for day in 1..=30 {
        store.upsert_log(DailyLog::new("demo", date(day)), now).unwrap();
    }

    let records = refresh_insights(&store, "demo", Some(5), now).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].insight.description.starts_with("You've logged 5 days."));
    assert_eq!(records[0].valid_from, Some(date(26)));
}

#[test]
fn test_new_logs_invalidate_saved_insights() {
    let dir = tempdir().unwrap();
    let store = open(dir.path());
    let now = Utc.with_ymd_and_hms(2026, 7, 30, 8, 0, 0).unwrap();

    for day in 1..=3 {
        store.upsert_log(DailyLog::new("demo", date(day)), now).unwrap();
    }
    refresh_insights(&store, "demo", None, now).unwrap();
    assert!(dir.path().join("users/demo/insights.json").exists());

    for day in 4..=10 {
        store.upsert_log(DailyLog::new("demo", date(day)), now).unwrap();
    }
    assert!(store.insights_for("demo").unwrap().is_empty());
    assert!(!dir.path().join("users/demo/insights.json").exists());

    let records = refresh_insights(&store, "demo", None, now).unwrap();
    assert!(records
        .iter()
        .all(|r| !r.insight.description.starts_with("You've logged 3 days")));
    assert_eq!(records[0].valid_to, Some(date(10)));

    store.delete_log("demo", date(10)).unwrap();
    assert!(open(dir.path()).insights_for("demo").unwrap().is_empty());
}

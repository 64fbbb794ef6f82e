//! Export of logs and insights
//!
//! Simple, testable export with anyhow context at every I/O edge.

use anyhow::{Context, Result};
use cyclewise_types::{DailyLog, InsightRecord};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export logs to CSV
///
/// CSV columns: Date, Energy, Sleep Quality, Sleep Hours, Stress, Phase,
/// Moods, Symptoms, Cravings, Notes. Rows follow input order; unreported
/// values are empty cells and tag sets are `;`-separated.
///
/// # Errors
/// Returns error if file creation or write operations fail
pub fn export_logs_to_csv(logs: &[DailyLog], path: &Path) -> Result<()> {
    create_parent(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "Date,Energy,Sleep Quality,Sleep Hours,Stress,Phase,Moods,Symptoms,Cravings,Notes"
    )
    .context("Failed to write CSV header")?;

    for log in logs {
        writeln!(
            writer,
            "{},{},{},{},{},{},\"{}\",\"{}\",\"{}\",{}",
            log.log_date.format("%Y-%m-%d"),
            cell(log.energy_level),
            cell(log.sleep_quality),
            cell(log.sleep_hours),
            cell(log.stress_level),
            cell(log.cycle_phase),
            join_tags(&log.mood),
            join_tags(&log.physical_symptoms),
            join_tags(&log.cravings),
            escape_csv(log.notes.as_deref().unwrap_or("")),
        )
        .with_context(|| format!("Failed to write row for {}", log.log_date))?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

/// Export stored insights to pretty-printed JSON
pub fn export_insights_to_json(insights: &[InsightRecord], path: &Path) -> Result<()> {
    create_parent(path)?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, insights).context("Failed to serialize insights")?;
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush JSON writer")?;

    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn cell<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn join_tags<'a, T, I>(tags: I) -> String
where
    T: AsRef<str> + 'a,
    I: IntoIterator<Item = &'a T>,
{
    tags.into_iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(";")
}

/// Quote a free-text field when it contains CSV metacharacters
fn escape_csv(text: &str) -> String {
    if text.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

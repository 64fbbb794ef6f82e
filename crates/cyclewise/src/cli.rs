//! Terminal rendering and argument helpers
//!
//! Date filters, log/insight tables and profile summaries for the CLI.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};
use cyclewise_core::models::{DailyLog, Profile};
use cyclewise_core::{InsightSummary, PresentedInsight};

// ============================================================================
// Date Filter
// ============================================================================

/// Date filter for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    Days(u32),
    Months(u32),
    Years(u32),
    Since(NaiveDate),
}

impl DateFilter {
    /// Parse from string: "7d", "30d", "3m", "1y", "YYYY-MM-DD"
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(stripped) = s.strip_suffix('d') {
            let days = stripped
                .parse::<u32>()
                .context("Invalid days format (expected: 7d)")?;
            return Ok(DateFilter::Days(days));
        }

        if let Some(stripped) = s.strip_suffix('m') {
            let months = stripped
                .parse::<u32>()
                .context("Invalid months format (expected: 3m)")?;
            return Ok(DateFilter::Months(months));
        }

        if let Some(stripped) = s.strip_suffix('y') {
            let years = stripped
                .parse::<u32>()
                .context("Invalid years format (expected: 1y)")?;
            return Ok(DateFilter::Years(years));
        }

        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").context("Invalid date format")?;
        Ok(DateFilter::Since(date))
    }

    /// First day included, counting `today` as day one of the window.
    ///
    /// Windows reaching past the earliest representable date clamp to it.
    pub fn cutoff(&self, today: NaiveDate) -> NaiveDate {
        let back = |days: i64| {
            Duration::try_days(days.saturating_sub(1).max(0))
                .and_then(|span| today.checked_sub_signed(span))
                .unwrap_or(NaiveDate::MIN)
        };
        match self {
            DateFilter::Days(d) => back(i64::from(*d)),
            DateFilter::Months(m) => back(i64::from(*m).saturating_mul(30)),
            DateFilter::Years(y) => back(i64::from(*y).saturating_mul(365)),
            DateFilter::Since(date) => *date,
        }
    }
}

// ============================================================================
// Tag Arguments
// ============================================================================

/// Split repeated/comma-separated tag arguments into trimmed values
pub fn split_tags(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

// ============================================================================
// Formatting
// ============================================================================

fn header(table: &mut Table, columns: &[&str], no_color: bool) {
    if no_color {
        table.set_header(columns.to_vec());
    } else {
        table.set_header(
            columns
                .iter()
                .map(|c| Cell::new(c).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );
    }
}

/// Format logs as table (human) or JSON
pub fn format_log_table(logs: &[DailyLog], json: bool, no_color: bool) -> String {
    if json {
        return serde_json::to_string_pretty(logs).unwrap_or_else(|_| "[]".to_string());
    }

    if logs.is_empty() {
        return "No logs found.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    header(
        &mut table,
        &[
            "Date", "Phase", "Energy", "Sleep", "Hours", "Stress", "Symptoms", "Cravings", "Notes",
        ],
        no_color,
    );

    for log in logs {
        let date = log.log_date.format("%a %Y-%m-%d").to_string();
        let phase = log
            .cycle_phase
            .map(|p| p.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        let symptoms = join_labels(log.physical_symptoms.iter().map(|s| s.label()));
        let cravings = join_labels(log.cravings.iter().map(|c| c.label()));
        let notes = log
            .notes
            .as_deref()
            .map(|n| truncate(n, 30))
            .unwrap_or_default();

        table.add_row(Row::from(vec![
            date,
            phase,
            score(log.energy_level),
            score(log.sleep_quality),
            log.sleep_hours
                .map(|h| format!("{:.1}", h))
                .unwrap_or_else(|| "-".to_string()),
            score(log.stress_level),
            symptoms,
            cravings,
            notes,
        ]));
    }

    table.to_string()
}

/// Format the summary card and gated insights
pub fn format_insights(summary: &InsightSummary, insights: &[PresentedInsight], no_color: bool) -> String {
    let mut out = format!(
        "Days logged: {}   Patterns found: {}   Free insights: {}\n",
        summary.days_logged, summary.patterns_found, summary.free_insights
    );

    if insights.is_empty() {
        out.push_str("\nNo insights yet.");
        return out;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    header(&mut table, &["", "Insight", "Confidence", "Details"], no_color);

    for insight in insights {
        let icon = if insight.locked {
            "🔒"
        } else {
            insight.insight_type.icon()
        };
        let confidence = insight
            .confidence_score
            .map(|c| format!("{:.0}%", c * 100.0))
            .unwrap_or_else(|| "-".to_string());

        let mut title = Cell::new(&insight.title);
        if !no_color && insight.is_premium {
            title = title.fg(Color::Yellow);
        }

        table.add_row(Row::from(vec![
            Cell::new(icon),
            title,
            Cell::new(confidence),
            Cell::new(&insight.description),
        ]));
    }

    out.push('\n');
    out.push_str(&table.to_string());

    let locked = insights.iter().filter(|i| i.locked).count();
    if locked > 0 {
        out.push_str(&format!(
            "\n\n{} premium insight{} locked. Run `cyclewise profile --upgrade` to unlock.",
            locked,
            if locked == 1 { "" } else { "s" }
        ));
    }

    out
}

/// Format profile (human or JSON)
pub fn format_profile(profile: &Profile, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(profile).unwrap_or_else(|_| "{}".to_string());
    }

    format!(
        "Name:          {}\nCycle length:  {} days\nSubscription:  {:?}{}",
        profile.display_name,
        profile.cycle_length,
        profile.subscription_status,
        if profile.is_premium() { " (premium)" } else { "" }
    )
}

// ============================================================================
// Utilities
// ============================================================================

fn score(value: Option<u8>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let joined = labels.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

fn truncate(s: &str, max: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).collect::<String>() + "…"
    }
}

// ============================================================================
// Tests
// ============================================================================

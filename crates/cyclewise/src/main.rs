//! cyclewise - daily wellness log and pattern insights

mod cli;
mod logging;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use cyclewise_core::models::SubscriptionStatus;
use cyclewise_core::store::logs_for_analysis;
use cyclewise_core::{
    analyze_patterns, export_insights_to_json, export_logs_to_csv, load_profile, present_insight, refresh_insights,
    save_profile, validate_draft, CoreError, InsightSummary, JsonFileStore, LogDraft, LogStore,
    ProfileUpdate, StoreConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cyclewise",
    version,
    about = "Daily wellness log with pattern insights",
    long_about = "Log energy, sleep, stress, symptoms and cravings once a day, then let\n\
                  cyclewise find the patterns: weekday energy dips, sleep and stress effects,\n\
                  cycle-phase differences and recurring symptom clusters.\n\
                  \n\
                  Examples:\n\
                    cyclewise log --energy 6 --sleep-hours 7.5 --stress 4\n\
                    cyclewise log --date 2026-03-02 --symptom headache,fatigue --phase luteal\n\
                    cyclewise history --since 30d\n\
                    cyclewise insights --refresh\n\
                    cyclewise export --format csv --output logs.csv\n\
                  \n\
                  Environment Variables:\n\
                    CYCLEWISE_HOME                   # Override data directory\n\
                    CYCLEWISE_USER                   # Profile to read and write\n\
                    CYCLEWISE_NO_COLOR               # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG                         # Diagnostic log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory (default: platform data dir + /cyclewise)
    #[arg(long, env = "CYCLEWISE_HOME", global = true)]
    data_dir: Option<PathBuf>,

    /// User whose logs are read and written
    #[arg(long, env = "CYCLEWISE_USER", default_value = "demo", global = true)]
    user: String,

    /// Only analyze the last N days
    #[arg(long, global = true)]
    window_days: Option<u32>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "CYCLEWISE_NO_COLOR", global = true)]
    no_color: bool,

    /// Show debug diagnostics on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Record (or replace) the log for a day
    Log {
        /// Day to log (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Energy 1-10
        #[arg(long)]
        energy: Option<u8>,
        /// Sleep quality 1-10
        #[arg(long)]
        sleep_quality: Option<u8>,
        /// Hours slept
        #[arg(long)]
        sleep_hours: Option<f64>,
        /// Stress 1-10
        #[arg(long)]
        stress: Option<u8>,
        /// Moods, comma-separated
        #[arg(long)]
        mood: Vec<String>,
        /// Physical symptoms, comma-separated
        #[arg(long)]
        symptom: Vec<String>,
        /// Cravings, comma-separated ("none" on its own)
        #[arg(long)]
        craving: Vec<String>,
        /// Cycle phase: menstrual, follicular, ovulation, luteal, unknown
        #[arg(long)]
        phase: Option<String>,
        /// Day of cycle
        #[arg(long)]
        cycle_day: Option<u8>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show logged days, newest first
    History {
        /// Date filter: 7d, 30d, 3m, 1y, YYYY-MM-DD
        #[arg(long, short = 'd')]
        since: Option<String>,
        /// Max rows (default: 60)
        #[arg(long, short = 'n')]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show pattern insights
    Insights {
        /// Also save the results for `export --format json`
        #[arg(long)]
        refresh: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete the log for a day
    Delete {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Show or update the profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        /// Typical cycle length in days
        #[arg(long)]
        cycle_length: Option<u8>,
        /// Activate premium insights
        #[arg(long, conflicts_with = "downgrade")]
        upgrade: bool,
        /// Return to the free plan
        #[arg(long)]
        downgrade: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export logs (csv) or insights (json)
    Export {
        #[arg(long, default_value = "csv", value_parser = ["csv", "json"])]
        format: String,
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose, cli.no_color) {
        eprintln!("Warning: {:#}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        if let Some(hint) = e.downcast_ref::<CoreError>().and_then(CoreError::suggestion) {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = cli
        .data_dir
        .or_else(|| dirs::data_dir().map(|d| d.join("cyclewise")))
        .context("Could not determine data directory")?;

    let config = StoreConfig {
        analysis_window_days: cli.window_days,
        ..StoreConfig::new(data_dir)
    };
    let store = JsonFileStore::new(config.clone())?;
    let user = cli.user;
    let no_color = cli.no_color;

    match cli.command {
        Command::Log {
            date,
            energy,
            sleep_quality,
            sleep_hours,
            stress,
            mood,
            symptom,
            craving,
            phase,
            cycle_day,
            notes,
        } => {
            let draft = LogDraft {
                log_date: date,
                energy_level: energy,
                sleep_quality,
                stress_level: stress,
                sleep_hours,
                mood: cli::split_tags(&mood),
                physical_symptoms: cli::split_tags(&symptom),
                cravings: cli::split_tags(&craving),
                cycle_phase: phase,
                cycle_day,
                notes,
            };
            run_log(&store, &user, draft)?;
        }
        Command::History { since, limit, json } => {
            run_history(&store, &user, since, limit.unwrap_or(config.history_limit), json, no_color)?;
        }
        Command::Insights { refresh, json } => {
            run_insights(&store, &config, &user, refresh, json, no_color)?;
        }
        Command::Delete { date } => {
            let removed = store.delete_log(&user, date)?;
            println!("Deleted log for {}", removed.log_date.format("%a %Y-%m-%d"));
        }
        Command::Profile {
            name,
            cycle_length,
            upgrade,
            downgrade,
            json,
        } => {
            let status = match (upgrade, downgrade) {
                (true, _) => Some(SubscriptionStatus::Active),
                (_, true) => Some(SubscriptionStatus::Free),
                _ => None,
            };
            let update = ProfileUpdate {
                display_name: name,
                cycle_length,
                subscription_status: status,
            };
            run_profile(&config, &user, update, json)?;
        }
        Command::Export { format, output } => {
            run_export(&store, &config, &user, &format, &output)?;
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn run_log(store: &JsonFileStore, user: &str, draft: LogDraft) -> Result<()> {
    let log = validate_draft(draft, user, today())?;
    let replacing = store.get_log(user, log.log_date)?.is_some();
    let saved = store.upsert_log(log, Utc::now())?;

    println!(
        "{} log for {}",
        if replacing { "Updated" } else { "Saved" },
        saved.log_date.format("%a %Y-%m-%d")
    );

    let total = store.logs_for(user)?.len();
    if total < cyclewise_core::analytics::MIN_LOGS_FOR_INSIGHTS {
        println!(
            "{} more day{} until pattern insights unlock.",
            cyclewise_core::analytics::MIN_LOGS_FOR_INSIGHTS - total,
            if cyclewise_core::analytics::MIN_LOGS_FOR_INSIGHTS - total == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn run_history(
    store: &JsonFileStore,
    user: &str,
    since: Option<String>,
    limit: usize,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let date_filter = if let Some(ref s) = since {
        Some(cli::DateFilter::parse(s).context("Invalid date filter")?)
    } else {
        None
    };

    let mut logs = match date_filter {
        Some(filter) => {
            let today = today();
            store.logs_between(user, filter.cutoff(today), today)?
        }
        None => store.logs_for(user)?,
    };
    logs.truncate(limit);

    println!("{}", cli::format_log_table(&logs, json, no_color));
    Ok(())
}

fn run_insights(
    store: &JsonFileStore,
    config: &StoreConfig,
    user: &str,
    refresh: bool,
    json: bool,
    no_color: bool,
) -> Result<()> {
    let logs = logs_for_analysis(store, user, config.analysis_window_days, today())?;

    // Always analyze the current logs; --refresh also saves the results
    let insights: Vec<_> = if refresh {
        refresh_insights(store, user, config.analysis_window_days, Utc::now())?
            .into_iter()
            .map(|r| r.insight)
            .collect()
    } else {
        analyze_patterns(&logs)
    };
    let summary = InsightSummary::new(logs.len(), &insights);

    let entitled = load_profile(config, user)?.is_premium();
    let (free, premium) = cyclewise_core::partition_insights(&insights);
    let presented: Vec<_> = free
        .into_iter()
        .chain(premium)
        .map(|insight| present_insight(insight, entitled))
        .collect();

    if json {
        let body = serde_json::json!({ "summary": summary, "insights": presented });
        println!("{}", serde_json::to_string_pretty(&body).context("Failed to serialize insights")?);
    } else {
        println!("{}", cli::format_insights(&summary, &presented, no_color));
    }

    Ok(())
}

fn run_profile(config: &StoreConfig, user: &str, update: ProfileUpdate, json: bool) -> Result<()> {
    let mut profile = load_profile(config, user)?;

    if !update.is_empty() {
        update.apply(&mut profile);
        save_profile(config, user, &profile)?;
        tracing::info!(user, status = ?profile.subscription_status, "Profile updated");
    }

    println!("{}", cli::format_profile(&profile, json));
    Ok(())
}

fn run_export(
    store: &JsonFileStore,
    config: &StoreConfig,
    user: &str,
    format: &str,
    output: &std::path::Path,
) -> Result<()> {
    match format {
        "json" => {
            let mut records = store.insights_for(user)?;
            if records.is_empty() {
                records = refresh_insights(store, user, config.analysis_window_days, Utc::now())?;
            }
            export_insights_to_json(&records, output)?;
            println!("Exported {} insights to {}", records.len(), output.display());
        }
        _ => {
            let logs = store.logs_for(user)?;
            export_logs_to_csv(&logs, output)?;
            println!("Exported {} logs to {}", logs.len(), output.display());
        }
    }
    Ok(())
}

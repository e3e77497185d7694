use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use vibrolab::export::{RecordedSession, SessionSummary, clear_all, list_sessions, read_export};

#[derive(Parser, Debug)]
#[command(name = "session_history")]
#[command(about = "List, summarize and clear exported accelerometer sessions", long_about = None)]
struct Args {
    /// Directory holding exported sessions
    #[arg(default_value = "exports")]
    dir: PathBuf,

    /// Output format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Parse each file and include magnitude statistics
    #[arg(short = 's', long)]
    summary: bool,

    /// Delete every exported session in the directory
    #[arg(long)]
    clear: bool,

    /// Confirm --clear without prompting
    #[arg(short = 'y', long)]
    yes: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct SessionEntry {
    file_name: String,
    date: String,
    timestamp_ms: i64,
    size_bytes: u64,
    size: String,
    summary: Option<SessionSummary>,
    error: Option<String>,
}

fn describe(session: &RecordedSession, with_summary: bool) -> SessionEntry {
    let (summary, error) = if with_summary {
        match read_export(&session.path) {
            Ok(readings) => (SessionSummary::from_readings(&readings), None),
            Err(e) => {
                log::warn!("Could not read {}: {}", session.file_name, e);
                (None, Some(e.to_string()))
            }
        }
    } else {
        (None, None)
    };

    SessionEntry {
        file_name: session.file_name.clone(),
        date: session.formatted_date(),
        timestamp_ms: session.timestamp_ms,
        size_bytes: session.size_bytes,
        size: session.formatted_size(),
        summary,
        error,
    }
}

fn print_text(entries: &[SessionEntry]) {
    if entries.is_empty() {
        println!("No recorded sessions");
        return;
    }

    for entry in entries {
        println!("{:<40} {:<20} {:>10}", entry.file_name, entry.date, entry.size);
        if let Some(summary) = &entry.summary {
            println!(
                "    {} readings, {}  max |a| {:.3}  mean {:.3} ± {:.3}",
                summary.count,
                summary.formatted_duration(),
                summary.max_magnitude,
                summary.mean_magnitude,
                summary.std_dev_magnitude
            );
        }
        if let Some(error) = &entry.error {
            println!("    unreadable: {}", error);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    if args.clear {
        if !args.yes {
            anyhow::bail!(
                "Refusing to delete sessions in {} without --yes",
                args.dir.display()
            );
        }
        let removed = clear_all(&args.dir)
            .with_context(|| format!("Failed to clear {}", args.dir.display()))?;
        println!("Deleted {} sessions", removed);
        return Ok(());
    }

    let sessions = list_sessions(&args.dir)
        .with_context(|| format!("Failed to list {}", args.dir.display()))?;
    let entries: Vec<SessionEntry> = sessions
        .iter()
        .map(|s| describe(s, args.summary))
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&entries),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&entries).context("Failed to serialize sessions")?;
            println!("{}", json);
        }
    }

    Ok(())
}

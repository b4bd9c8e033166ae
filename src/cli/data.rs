//! CLI commands for the production dataset

use std::path::PathBuf;

use chrono::Duration;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_record_table, format_totals_line};
use crate::error::{ReportError, ReportResult};
use crate::models::ProductionTotals;
use crate::monitor::PerformanceMonitor;
use crate::services::ImportService;
use crate::storage::{sample_records, Storage};

use super::parse_date;

/// Number of facilities in the sample dataset
const SAMPLE_FACILITIES: i64 = 5;

/// Data subcommands
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// List production records, most recent last
    List {
        /// Number of records to show
        #[arg(short, long, default_value = "25")]
        limit: usize,
    },

    /// Import production records from a CSV or JSON file
    Import {
        /// Path to the file
        file: PathBuf,
    },

    /// Add deterministic sample records
    Seed {
        /// Number of records to create
        #[arg(short, long, default_value = "50")]
        count: usize,

        /// First reading date (YYYY-MM-DD); by default the data ends today
        #[arg(short, long)]
        start: Option<String>,
    },

    /// Remove all production records
    Clear {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}

/// Handle data commands
pub fn handle_data_command(
    storage: &Storage,
    settings: &Settings,
    monitor: &mut PerformanceMonitor,
    cmd: DataCommands,
) -> ReportResult<()> {
    match cmd {
        DataCommands::List { limit } => {
            let records = storage.records.get_all()?;
            let start = records.len().saturating_sub(limit);
            let shown = &records[start..];

            println!("{}", format_record_table(shown));
            if let (Some(first), Some(last)) = (shown.first(), shown.last()) {
                println!(
                    "Showing {} of {} records ({} to {})",
                    shown.len(),
                    records.len(),
                    first.date().format(&settings.date_format),
                    last.date().format(&settings.date_format)
                );
            }
            println!("{}", format_totals_line(&ProductionTotals::from_records(&records)));
            Ok(())
        }
        DataCommands::Import { file } => {
            if !file.exists() {
                return Err(ReportError::file_not_found(&file));
            }

            let service = ImportService::new(storage);
            let result = monitor.measure("import", || service.import_file(&file))?;

            println!(
                "Imported {} new records ({} replaced).",
                result.imported, result.replaced
            );
            if result.errors() > 0 {
                println!("Skipped {} invalid rows:", result.errors());
                for (line, message) in &result.error_messages {
                    println!("  line {}: {}", line, message);
                }
            }
            Ok(())
        }
        DataCommands::Seed { count, start } => {
            let start = match start {
                Some(s) => parse_date(&s)?,
                None => {
                    let days = (count as i64 + SAMPLE_FACILITIES - 1) / SAMPLE_FACILITIES;
                    chrono::Local::now().date_naive() - Duration::days((days - 1).max(0))
                }
            };

            let added = storage.records.extend(sample_records(count, start))?;
            storage.records.save()?;

            println!(
                "Seeded {} sample records starting {} ({} new).",
                count, start, added
            );
            Ok(())
        }
        DataCommands::Clear { yes } => {
            if !yes {
                println!(
                    "This removes all {} production records. Re-run with --yes to confirm.",
                    storage.records.len()?
                );
                return Ok(());
            }

            let removed = storage.records.clear()?;
            storage.records.save()?;
            println!("Removed {} production records.", removed);
            Ok(())
        }
    }
}

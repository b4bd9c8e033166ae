//! CLI commands for data export

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::ReportResult;
use crate::monitor::PerformanceMonitor;
use crate::services::DeliveryService;
use crate::storage::Storage;

use super::parse_format;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all production records
    Records {
        /// Export format (csv, json, excel)
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Write into this directory instead of the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    monitor: &mut PerformanceMonitor,
    cmd: ExportCommands,
) -> ReportResult<()> {
    match cmd {
        ExportCommands::Records { format, output } => {
            let format = parse_format(&format)?;
            let today = chrono::Local::now().date_naive();
            let service = DeliveryService::new(storage, settings).with_output_dir(output);

            let delivery = monitor.measure("export", || service.export_records(format, today))?;

            if let Some(note) = delivery.artifact.stand_in {
                println!("Note: {}", note);
            }
            println!(
                "Exported {} records to: {}",
                storage.records.len()?,
                delivery.path.display()
            );
            Ok(())
        }
    }
}

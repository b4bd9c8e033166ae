use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use esg_report::cli::wizard::run_wizard;
use esg_report::cli::{handle_data_command, handle_export_command, handle_report_command};
use esg_report::config::{paths::ReportPaths, settings::Settings};
use esg_report::logging::{init_logging, LogConfig, LogFormat};
use esg_report::monitor::PerformanceMonitor;
use esg_report::storage::Storage;

/// File the dashboard logs to, under the base directory
const TUI_LOG_FILE: &str = "esgreport.log";

#[derive(Parser)]
#[command(
    name = "esgreport",
    version,
    about = "ESG report generation and production data export",
    long_about = "esgreport builds environmental, ESG, carbon, sustainability and \
                  compliance reports from facility production data through a \
                  step-by-step wizard, and exports the underlying records as CSV, \
                  JSON or Excel."
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard
    #[command(alias = "ui")]
    Tui,

    /// Walk through the report wizard on the terminal
    Wizard,

    /// Report generation and history
    #[command(subcommand)]
    Report(esg_report::cli::ReportCommands),

    /// Export production records
    #[command(subcommand)]
    Export(esg_report::cli::ExportCommands),

    /// Manage production data
    #[command(subcommand)]
    Data(esg_report::cli::DataCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ReportPaths::new()?;
    let is_tui = matches!(cli.command, Some(Commands::Tui));

    // The dashboard owns the terminal, so its logs go to a file
    let log_file = is_tui.then(|| paths.base_dir().join(TUI_LOG_FILE));
    if is_tui {
        paths.ensure_directories()?;
    }
    let log_config = LogConfig::from_verbosity(cli.verbose)
        .with_timestamps(cli.verbose > 0)
        .with_ansi(io::stderr().is_terminal())
        .with_format(cli.log_format)
        .with_log_file(log_file);
    init_logging(&log_config)?;

    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    debug!(base_dir = %paths.base_dir().display(), "storage ready");

    let mut monitor = PerformanceMonitor::new();

    match cli.command {
        Some(Commands::Tui) => {
            esg_report::tui::run_tui(&storage, &settings, &mut monitor)?;
        }
        Some(Commands::Wizard) => {
            run_wizard(&storage, &settings, &mut monitor)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, &mut monitor, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, &mut monitor, cmd)?;
        }
        Some(Commands::Data(cmd)) => {
            handle_data_command(&storage, &settings, &mut monitor, cmd)?;
        }
        Some(Commands::Config) => {
            println!("esgreport Configuration");
            println!("=======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", settings.export_dir(&paths).display());
            println!("History log:      {}", paths.history_log().display());
            println!();
            println!("Settings:");
            println!("  Default format:      {}", settings.default_format);
            println!("  Generation delay:    {} ms", settings.generation_delay_ms);
            println!("  CSV quoting:         {:?}", settings.csv_quoting);
            println!("  Loader chunk size:   {}", settings.loader_chunk_size);
            println!("  Date format:         {}", settings.date_format);
        }
        None => {
            println!("esgreport - ESG report generation");
            println!();
            println!("Run 'esgreport --help' for usage information.");
            println!("Run 'esgreport tui' to launch the dashboard.");
        }
    }

    monitor.finish();
    Ok(())
}

//! CLI commands for reports
//!
//! Generates reports non-interactively, lists templates and shows the
//! history of delivered artifacts.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_history_table, format_report_summary, format_template_table};
use crate::error::ReportResult;
use crate::models::ReportConfig;
use crate::monitor::PerformanceMonitor;
use crate::services::DeliveryService;
use crate::storage::Storage;
use crate::wizard::{SimulatedGenerator, WizardController};

use super::{parse_date, parse_format, parse_period, parse_report_type};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Generate a report and save it to the export directory
    Generate(GenerateArgs),

    /// List report templates and their default sections
    Templates,

    /// Show generated reports and exports
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Options for `report generate`
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Report type (environmental, esg, carbon, sustainability, compliance)
    #[arg(short = 't', long = "type", default_value = "environmental")]
    pub report_type: String,

    /// Reporting period (monthly, quarterly, annual)
    #[arg(short, long, default_value = "monthly")]
    pub period: String,

    /// Start date (YYYY-MM-DD), defaults to 30 days before the end date
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output format (pdf, excel, csv, json); defaults to the configured format
    #[arg(short, long)]
    pub format: Option<String>,

    /// Section to include (repeatable); template defaults when omitted
    #[arg(long = "section")]
    pub sections: Vec<String>,

    /// Recipient email (repeatable)
    #[arg(short, long = "recipient")]
    pub recipients: Vec<String>,

    /// Leave charts out
    #[arg(long)]
    pub no_charts: bool,

    /// Leave recommendations out
    #[arg(long)]
    pub no_recommendations: bool,

    /// Compare with the preceding period
    #[arg(long)]
    pub comparison: bool,

    /// Write into this directory instead of the export directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    monitor: &mut PerformanceMonitor,
    cmd: ReportCommands,
) -> ReportResult<()> {
    match cmd {
        ReportCommands::Generate(args) => handle_generate(storage, settings, monitor, args),
        ReportCommands::Templates => {
            println!("{}", format_template_table());
            Ok(())
        }
        ReportCommands::History { limit } => {
            let delivery = DeliveryService::new(storage, settings);
            let entries = delivery.history().read_recent(limit)?;
            println!("{}", format_history_table(&entries));
            Ok(())
        }
    }
}

/// Build a report configuration from command-line options
pub fn build_config(
    args: &GenerateArgs,
    settings: &Settings,
    today: NaiveDate,
) -> ReportResult<ReportConfig> {
    let end = match &args.end {
        Some(e) => parse_date(e)?,
        None => today,
    };
    let mut config = ReportConfig::new(end);

    config.report_type = parse_report_type(&args.report_type)?;
    config.period = parse_period(&args.period)?;
    config.format = match &args.format {
        Some(f) => parse_format(f)?,
        None => settings.default_format,
    };

    if let Some(s) = &args.start {
        config.set_date_range(parse_date(s)?, end)?;
    }

    for section in &args.sections {
        let section = section.trim();
        if !section.is_empty() && !config.has_section(section) {
            config.toggle_section(section);
        }
    }
    for recipient in &args.recipients {
        config.add_recipient(recipient);
    }

    config.include_charts = !args.no_charts;
    config.include_recommendations = !args.no_recommendations;
    config.include_comparison = args.comparison;

    Ok(config)
}

fn handle_generate(
    storage: &Storage,
    settings: &Settings,
    monitor: &mut PerformanceMonitor,
    args: GenerateArgs,
) -> ReportResult<()> {
    let today = chrono::Local::now().date_naive();
    let config = build_config(&args, settings, today)?;

    // Walk the same steps as the interactive wizard
    let mut wizard = WizardController::new(config);
    wizard.advance();
    wizard.advance();

    let records = storage.records.get_all()?;
    let generator = SimulatedGenerator::new(settings.generation_delay());

    println!("Generating report...");
    let report = monitor.measure("generate", || wizard.generate(&generator, &records))?;

    let service = DeliveryService::new(storage, settings).with_output_dir(args.output);
    let delivery = monitor.measure("export", || service.deliver_report(&report))?;

    println!();
    println!("{}", format_report_summary(&report));
    if let Some(note) = delivery.artifact.stand_in {
        println!("Note: {}", note);
    }
    println!("Report saved to: {}", delivery.path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReportFormat, ReportPeriod, ReportType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn args() -> GenerateArgs {
        GenerateArgs {
            report_type: "environmental".into(),
            period: "monthly".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = build_config(&args(), &Settings::default(), today()).unwrap();

        assert_eq!(config.report_type, ReportType::Environmental);
        assert_eq!(config.format, ReportFormat::Pdf);
        assert_eq!(config.end_date(), today());
        assert_eq!(config.start_date(), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
        assert!(config.sections().is_empty());
        assert!(config.include_charts);
        assert!(!config.include_comparison);
    }

    #[test]
    fn test_explicit_options() {
        let args = GenerateArgs {
            report_type: "carbon".into(),
            period: "quarterly".into(),
            start: Some("2024-01-01".into()),
            end: Some("2024-03-31".into()),
            format: Some("json".into()),
            sections: vec!["Scope 1 Emissions".into(), "Scope 1 Emissions".into()],
            recipients: vec!["a@example.com".into(), " a@example.com ".into()],
            no_charts: true,
            comparison: true,
            ..Default::default()
        };

        let config = build_config(&args, &Settings::default(), today()).unwrap();

        assert_eq!(config.report_type, ReportType::Carbon);
        assert_eq!(config.period, ReportPeriod::Quarterly);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.sections().len(), 1);
        assert_eq!(config.recipients(), ["a@example.com".to_string()]);
        assert!(!config.include_charts);
        assert!(config.include_comparison);
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let args = GenerateArgs {
            start: Some("2024-06-30".into()),
            end: Some("2024-06-01".into()),
            ..args()
        };
        assert!(build_config(&args, &Settings::default(), today())
            .unwrap_err()
            .is_validation());
    }
}

//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod data;
pub mod export;
pub mod report;
pub mod wizard;

use chrono::NaiveDate;

use crate::error::{ReportError, ReportResult};
use crate::models::{ReportFormat, ReportPeriod, ReportType};

pub use data::{handle_data_command, DataCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use wizard::InteractiveWizard;

pub(crate) fn parse_report_type(s: &str) -> ReportResult<ReportType> {
    ReportType::parse(s).ok_or_else(|| {
        ReportError::Validation(format!(
            "Invalid report type: '{}'. Valid types: environmental, esg, carbon, sustainability, compliance",
            s
        ))
    })
}

pub(crate) fn parse_period(s: &str) -> ReportResult<ReportPeriod> {
    ReportPeriod::parse(s).ok_or_else(|| {
        ReportError::Validation(format!(
            "Invalid period: '{}'. Valid periods: monthly, quarterly, annual",
            s
        ))
    })
}

pub(crate) fn parse_format(s: &str) -> ReportResult<ReportFormat> {
    ReportFormat::parse(s).ok_or_else(|| {
        ReportError::Validation(format!(
            "Invalid format: '{}'. Valid formats: pdf, excel, csv, json",
            s
        ))
    })
}

pub(crate) fn parse_date(s: &str) -> ReportResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ReportError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsers_accept_known_values() {
        assert_eq!(parse_report_type("carbon").unwrap(), ReportType::Carbon);
        assert_eq!(parse_period("annual").unwrap(), ReportPeriod::Annual);
        assert_eq!(parse_format("xlsx").unwrap(), ReportFormat::Excel);
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parsers_reject_unknown_values() {
        assert!(parse_report_type("financial").unwrap_err().is_validation());
        assert!(parse_format("docx").unwrap_err().is_validation());
        assert!(parse_date("01/02/2024").unwrap_err().is_validation());
    }
}

//! Report configuration
//!
//! The mutable configuration a wizard session edits: report kind, period,
//! date window, output format, sections, recipients and content flags.

use std::collections::BTreeSet;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::report::{ReportFormat, ReportPeriod, ReportType};
use super::template::ReportTemplate;
use crate::error::{ReportError, ReportResult};

/// Length of the default reporting window in days
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Configuration of a report under construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub report_type: ReportType,

    pub period: ReportPeriod,

    /// Inclusive start of the reporting window
    start_date: NaiveDate,

    /// Inclusive end of the reporting window
    end_date: NaiveDate,

    pub format: ReportFormat,

    /// Selected sections; empty until the template step fills it
    sections: BTreeSet<String>,

    /// Recipient addresses in insertion order, without duplicates
    recipients: Vec<String>,

    pub include_charts: bool,

    pub include_recommendations: bool,

    pub include_comparison: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

impl ReportConfig {
    /// Create a configuration whose window ends on `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            report_type: ReportType::default(),
            period: ReportPeriod::default(),
            start_date: today - Duration::days(DEFAULT_WINDOW_DAYS),
            end_date: today,
            format: ReportFormat::default(),
            sections: BTreeSet::new(),
            recipients: Vec::new(),
            include_charts: true,
            include_recommendations: true,
            include_comparison: false,
        }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Set the reporting window
    ///
    /// # Errors
    ///
    /// Returns a validation error when `start` is after `end`; the current
    /// window is left unchanged.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> ReportResult<()> {
        if start > end {
            return Err(ReportError::Validation(format!(
                "Start date {} is after end date {}",
                start, end
            )));
        }
        self.start_date = start;
        self.end_date = end;
        Ok(())
    }

    pub fn sections(&self) -> &BTreeSet<String> {
        &self.sections
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains(name)
    }

    /// Add the section if absent, remove it if present
    pub fn toggle_section(&mut self, name: &str) {
        if !self.sections.remove(name) {
            self.sections.insert(name.to_string());
        }
    }

    /// Populate sections from the selected template when none are chosen yet
    ///
    /// Returns true if the sections were filled.
    pub fn fill_default_sections(&mut self) -> bool {
        if !self.sections.is_empty() {
            return false;
        }
        let template = ReportTemplate::for_type(self.report_type);
        self.sections = template
            .default_sections
            .iter()
            .map(|s| s.to_string())
            .collect();
        true
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Append a recipient
    ///
    /// Empty input and addresses already present are ignored. No address
    /// format check is made. Returns true if the recipient was added.
    pub fn add_recipient(&mut self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() || self.recipients.iter().any(|r| r == email) {
            return false;
        }
        self.recipients.push(email.to_string());
        true
    }

    /// Remove a recipient by exact match. Returns true if one was removed.
    pub fn remove_recipient(&mut self, email: &str) -> bool {
        let before = self.recipients.len();
        self.recipients.retain(|r| r != email);
        self.recipients.len() != before
    }

    /// Check the configuration is ready to generate
    pub fn validate(&self) -> ReportResult<()> {
        if self.start_date > self.end_date {
            return Err(ReportError::Validation(format!(
                "Start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        if self.sections.is_empty() {
            return Err(ReportError::Validation(
                "At least one section must be selected".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = ReportConfig::new(today());
        assert_eq!(config.report_type, ReportType::Environmental);
        assert_eq!(config.period, ReportPeriod::Monthly);
        assert_eq!(config.format, ReportFormat::Pdf);
        assert_eq!(config.end_date(), today());
        assert_eq!(config.start_date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!(config.sections().is_empty());
        assert!(config.recipients().is_empty());
    }

    #[test]
    fn test_toggle_section_twice_is_identity() {
        let mut config = ReportConfig::new(today());
        config.fill_default_sections();
        let original = config.clone();

        config.toggle_section("Water Management");
        assert!(!config.has_section("Water Management"));
        config.toggle_section("Water Management");
        assert_eq!(config, original);

        config.toggle_section("Audit Findings");
        assert!(config.has_section("Audit Findings"));
        config.toggle_section("Audit Findings");
        assert_eq!(config, original);
    }

    #[test]
    fn test_add_recipient_is_idempotent() {
        let mut config = ReportConfig::new(today());
        assert!(config.add_recipient("ops@example.com"));
        assert!(!config.add_recipient("ops@example.com"));
        assert_eq!(config.recipients(), ["ops@example.com".to_string()]);
    }

    #[test]
    fn test_add_recipient_ignores_empty() {
        let mut config = ReportConfig::new(today());
        assert!(!config.add_recipient(""));
        assert!(!config.add_recipient("   "));
        assert!(config.recipients().is_empty());
    }

    #[test]
    fn test_add_recipient_accepts_any_text() {
        let mut config = ReportConfig::new(today());
        assert!(config.add_recipient("not-an-email"));
        assert_eq!(config.recipients().len(), 1);
    }

    #[test]
    fn test_remove_recipient() {
        let mut config = ReportConfig::new(today());
        config.add_recipient("a@example.com");
        config.add_recipient("b@example.com");

        assert!(config.remove_recipient("a@example.com"));
        assert!(!config.remove_recipient("missing@example.com"));
        assert_eq!(config.recipients(), ["b@example.com".to_string()]);
    }

    #[test]
    fn test_set_date_range_rejects_inverted_window() {
        let mut config = ReportConfig::new(today());
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();

        let err = config.set_date_range(start, end).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(config.end_date(), today());

        config.set_date_range(end, end).unwrap();
        assert_eq!(config.start_date(), end);
    }

    #[test]
    fn test_fill_default_sections_keeps_existing_choice() {
        let mut config = ReportConfig::new(today());
        config.toggle_section("Permit Status");

        assert!(!config.fill_default_sections());
        assert_eq!(config.sections().len(), 1);
    }

    #[test]
    fn test_validate_requires_sections() {
        let mut config = ReportConfig::new(today());
        assert!(config.validate().unwrap_err().is_validation());

        config.fill_default_sections();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_serializes_camel_case() {
        let config = ReportConfig::new(today());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["reportType"], "environmental");
        assert_eq!(json["startDate"], "2024-03-01");
        assert_eq!(json["includeCharts"], true);
    }
}

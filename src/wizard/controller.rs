//! Report wizard state machine
//!
//! Three steps, walked forward with `advance` and backward with `retreat`:
//! template selection, detail configuration, review. Leaving the template
//! step fills the section list from the chosen template if it is still
//! empty. `generate` is only accepted on the review step.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::generator::{GeneratedReport, ReportGenerator};
use crate::error::{ReportError, ReportResult};
use crate::models::{ProductionRecord, ReportConfig, ReportFormat, ReportType};

/// Wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WizardStep {
    #[default]
    Template,
    Configure,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [Self::Template, Self::Configure, Self::Review];

    /// Zero-based position of the step
    pub fn index(self) -> usize {
        match self {
            Self::Template => 0,
            Self::Configure => 1,
            Self::Review => 2,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Template => Some(Self::Configure),
            Self::Configure => Some(Self::Review),
            Self::Review => None,
        }
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            Self::Template => None,
            Self::Configure => Some(Self::Template),
            Self::Review => Some(Self::Configure),
        }
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => write!(f, "Select Template"),
            Self::Configure => write!(f, "Configure Report"),
            Self::Review => write!(f, "Review & Generate"),
        }
    }
}

/// Drives one report configuration through the wizard steps
#[derive(Debug, Clone)]
pub struct WizardController {
    step: WizardStep,
    config: ReportConfig,
    report_generated: bool,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl WizardController {
    /// Start a wizard session on the template step
    pub fn new(config: ReportConfig) -> Self {
        Self {
            step: WizardStep::Template,
            config,
            report_generated: false,
        }
    }

    /// Start a session with the default window ending on `today` and a preselected format
    pub fn starting_on(today: NaiveDate, format: ReportFormat) -> Self {
        let mut config = ReportConfig::new(today);
        config.format = format;
        Self::new(config)
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Mutable access for field edits on any step
    pub fn config_mut(&mut self) -> &mut ReportConfig {
        &mut self.config
    }

    pub fn report_generated(&self) -> bool {
        self.report_generated
    }

    /// Choose the template (report type) on the first step
    pub fn select_template(&mut self, report_type: ReportType) {
        self.config.report_type = report_type;
    }

    /// Move to the next step; a no-op on the last step
    pub fn advance(&mut self) {
        if self.step == WizardStep::Template && self.config.fill_default_sections() {
            debug!(
                report_type = self.config.report_type.slug(),
                sections = self.config.sections().len(),
                "filled default sections from template"
            );
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
    }

    /// Move to the previous step; a no-op on the first step
    pub fn retreat(&mut self) {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
    }

    /// Generate the report from the review step
    ///
    /// # Errors
    ///
    /// Returns a validation error off the review step or for an invalid
    /// configuration, and passes through generator errors.
    pub fn generate<G: ReportGenerator + ?Sized>(
        &mut self,
        generator: &G,
        records: &[ProductionRecord],
    ) -> ReportResult<GeneratedReport> {
        if self.step != WizardStep::Review {
            return Err(ReportError::Validation(format!(
                "Reports can only be generated from the review step (current step: {})",
                self.step
            )));
        }
        self.config.validate()?;

        let report = generator.generate(&self.config, records)?;
        self.report_generated = true;
        info!(report_id = %report.id, "wizard completed");
        Ok(report)
    }

    /// Discard the configuration and start over on the template step
    pub fn reset(&mut self, today: NaiveDate) {
        let format = self.config.format;
        *self = Self::starting_on(today, format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportTemplate;
    use crate::wizard::generator::SimulatedGenerator;
    use std::collections::BTreeSet;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn controller() -> WizardController {
        WizardController::new(ReportConfig::new(today()))
    }

    #[test]
    fn test_advance_fills_template_sections_for_every_type() {
        for report_type in ReportType::ALL {
            let mut wizard = controller();
            wizard.select_template(report_type);
            wizard.advance();

            let expected: BTreeSet<String> = ReportTemplate::for_type(report_type)
                .default_sections
                .iter()
                .map(|s| s.to_string())
                .collect();
            assert_eq!(wizard.config().sections(), &expected, "{}", report_type);
            assert_eq!(wizard.step(), WizardStep::Configure);
        }
    }

    #[test]
    fn test_advance_keeps_edited_sections() {
        let mut wizard = controller();
        wizard.config_mut().toggle_section("Permit Status");
        wizard.advance();
        assert_eq!(wizard.config().sections().len(), 1);
    }

    #[test]
    fn test_retreat_at_first_step_is_noop() {
        let mut wizard = controller();
        wizard.retreat();
        assert_eq!(wizard.step(), WizardStep::Template);
    }

    #[test]
    fn test_advance_at_last_step_is_noop() {
        let mut wizard = controller();
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::Review);
        wizard.advance();
        assert_eq!(wizard.step(), WizardStep::Review);
    }

    #[test]
    fn test_retreat_then_advance_does_not_refill() {
        let mut wizard = controller();
        wizard.advance();
        wizard.config_mut().toggle_section("Executive Summary");
        let edited = wizard.config().sections().clone();

        wizard.retreat();
        wizard.advance();
        assert_eq!(wizard.config().sections(), &edited);
    }

    #[test]
    fn test_generate_only_from_review() {
        let generator = SimulatedGenerator::new(Duration::ZERO);
        let mut wizard = controller();

        let err = wizard.generate(&generator, &[]).unwrap_err();
        assert!(err.is_validation());
        assert!(!wizard.report_generated());

        wizard.advance();
        wizard.advance();
        let report = wizard.generate(&generator, &[]).unwrap();
        assert!(wizard.report_generated());
        assert_eq!(report.configuration, *wizard.config());
    }

    #[test]
    fn test_generate_rejects_empty_sections() {
        let generator = SimulatedGenerator::new(Duration::ZERO);
        let mut wizard = controller();
        wizard.advance();
        for section in wizard.config().sections().clone() {
            wizard.config_mut().toggle_section(&section);
        }
        wizard.advance();

        let err = wizard.generate(&generator, &[]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_reset_discards_configuration() {
        let mut wizard = WizardController::starting_on(today(), ReportFormat::Json);
        wizard.select_template(ReportType::Carbon);
        wizard.advance();
        wizard.config_mut().add_recipient("a@example.com");

        wizard.reset(today());
        assert_eq!(wizard.step(), WizardStep::Template);
        assert_eq!(wizard.config().report_type, ReportType::Environmental);
        assert_eq!(wizard.config().format, ReportFormat::Json);
        assert!(wizard.config().recipients().is_empty());
        assert!(!wizard.report_generated());
    }

    #[test]
    fn test_step_indices() {
        let indices: Vec<usize> = WizardStep::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(WizardStep::Review.is_last());
    }
}

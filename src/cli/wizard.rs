//! Interactive report wizard
//!
//! Walks a `WizardController` through its three steps with line prompts.
//! Enter keeps the value shown in brackets, `back` returns to the previous
//! step and `q` cancels.

use std::io::{self, BufRead, Write};

use crate::config::settings::Settings;
use crate::display::{format_config_review, format_report_summary};
use crate::error::{ReportError, ReportResult};
use crate::models::{ReportFormat, ReportPeriod, ReportTemplate, ReportType};
use crate::monitor::PerformanceMonitor;
use crate::services::DeliveryService;
use crate::storage::Storage;
use crate::wizard::{
    GeneratedReport, ReportGenerator, SimulatedGenerator, WizardController, WizardStep,
};

use super::parse_date;

/// What the user chose at the end of a step
enum StepOutcome {
    Continue,
    Back,
    Cancel,
}

/// Line-prompt front end for the report wizard
pub struct InteractiveWizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InteractiveWizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run the wizard to completion
    ///
    /// Returns `None` when the user cancels.
    pub fn run<G: ReportGenerator + ?Sized>(
        &mut self,
        wizard: &mut WizardController,
        generator: &G,
        records: &[crate::models::ProductionRecord],
    ) -> ReportResult<Option<GeneratedReport>> {
        writeln!(self.output)?;
        writeln!(self.output, "===========================================")?;
        writeln!(self.output, "  Report Generation Wizard")?;
        writeln!(self.output, "===========================================")?;

        loop {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "Step {} of {}: {}",
                wizard.step().index() + 1,
                WizardStep::ALL.len(),
                wizard.step()
            )?;
            writeln!(self.output, "{}", "-".repeat(40))?;

            let outcome = match wizard.step() {
                WizardStep::Template => self.template_step(wizard)?,
                WizardStep::Configure => self.configure_step(wizard)?,
                WizardStep::Review => self.review_step(wizard)?,
            };

            match outcome {
                StepOutcome::Cancel => {
                    writeln!(self.output, "Wizard cancelled.")?;
                    return Ok(None);
                }
                StepOutcome::Back => wizard.retreat(),
                StepOutcome::Continue if wizard.step().is_last() => {
                    writeln!(self.output, "Generating report...")?;
                    match wizard.generate(generator, records) {
                        Ok(report) => return Ok(Some(report)),
                        Err(e) if e.is_validation() => {
                            writeln!(self.output, "Cannot generate: {}", e)?;
                            wizard.retreat();
                        }
                        Err(e) => return Err(e),
                    }
                }
                StepOutcome::Continue => wizard.advance(),
            }
        }
    }

    fn template_step(&mut self, wizard: &mut WizardController) -> ReportResult<StepOutcome> {
        for (i, template) in ReportTemplate::all().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, template.name)?;
            writeln!(self.output, "     {}", template.description)?;
        }
        writeln!(self.output)?;

        let current = ReportType::ALL
            .iter()
            .position(|t| *t == wizard.config().report_type)
            .unwrap_or(0);

        loop {
            let answer = self.prompt(&format!("Select template [{}] (q to cancel): ", current + 1))?;
            if is_cancel(&answer) {
                return Ok(StepOutcome::Cancel);
            }
            if answer.is_empty() {
                return Ok(StepOutcome::Continue);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=ReportType::ALL.len()).contains(&n) => {
                    wizard.select_template(ReportType::ALL[n - 1]);
                    return Ok(StepOutcome::Continue);
                }
                _ => writeln!(self.output, "Please enter a number from 1 to {}.", ReportType::ALL.len())?,
            }
        }
    }

    fn configure_step(&mut self, wizard: &mut WizardController) -> ReportResult<StepOutcome> {
        let config = wizard.config_mut();

        let answer = self.prompt(&format!("Period (monthly/quarterly/annual) [{}]: ", config.period))?;
        if let Some(period) = ReportPeriod::parse(&answer) {
            config.period = period;
        } else if !answer.is_empty() {
            writeln!(self.output, "Unknown period '{}', keeping {}.", answer, config.period)?;
        }

        loop {
            let start = self.prompt(&format!("Start date [{}]: ", config.start_date()))?;
            let end = self.prompt(&format!("End date [{}]: ", config.end_date()))?;
            let range = (|| -> ReportResult<()> {
                let start = if start.is_empty() { config.start_date() } else { parse_date(&start)? };
                let end = if end.is_empty() { config.end_date() } else { parse_date(&end)? };
                config.set_date_range(start, end)
            })();
            match range {
                Ok(()) => break,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }

        let answer = self.prompt(&format!("Format (pdf/excel/csv/json) [{}]: ", config.format))?;
        if let Some(format) = ReportFormat::parse(&answer) {
            config.format = format;
        } else if !answer.is_empty() {
            writeln!(self.output, "Unknown format '{}', keeping {}.", answer, config.format)?;
        }

        let catalog = ReportTemplate::section_catalog();
        writeln!(self.output)?;
        writeln!(self.output, "Sections:")?;
        for (i, section) in catalog.iter().enumerate() {
            let mark = if config.has_section(section) { "x" } else { " " };
            writeln!(self.output, "  [{}] {:>2}. {}", mark, i + 1, section)?;
        }
        let answer = self.prompt("Toggle sections by number (comma separated), Enter to keep: ")?;
        for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<usize>() {
                Ok(n) if (1..=catalog.len()).contains(&n) => config.toggle_section(catalog[n - 1]),
                _ => writeln!(self.output, "Ignoring '{}'.", part)?,
            }
        }

        let answer = self.prompt("Recipients to add (comma separated, prefix with - to remove): ")?;
        for part in answer.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.strip_prefix('-') {
                Some(email) => {
                    config.remove_recipient(email.trim());
                }
                None => {
                    config.add_recipient(part);
                }
            }
        }

        config.include_charts = self.prompt_bool("Include charts", config.include_charts)?;
        config.include_recommendations =
            self.prompt_bool("Include recommendations", config.include_recommendations)?;
        config.include_comparison =
            self.prompt_bool("Compare with previous period", config.include_comparison)?;

        let answer = self.prompt("Continue to review? (yes/back/q) [yes]: ")?;
        Ok(navigation(&answer))
    }

    fn review_step(&mut self, wizard: &mut WizardController) -> ReportResult<StepOutcome> {
        writeln!(self.output, "{}", format_config_review(wizard.config()))?;
        let answer = self.prompt("Generate report? (yes/back/q) [yes]: ")?;
        Ok(navigation(&answer))
    }

    fn prompt(&mut self, prompt: &str) -> ReportResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Err(ReportError::Io("Input closed before the wizard finished".into()));
        }

        Ok(input.trim().to_string())
    }

    fn prompt_bool(&mut self, label: &str, current: bool) -> ReportResult<bool> {
        let default = if current { "yes" } else { "no" };
        let answer = self.prompt(&format!("{}? (yes/no) [{}]: ", label, default))?;
        Ok(match answer.to_lowercase().as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => current,
        })
    }
}

fn is_cancel(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "q" | "quit" | "cancel")
}

fn navigation(answer: &str) -> StepOutcome {
    if is_cancel(answer) {
        StepOutcome::Cancel
    } else if matches!(answer.to_lowercase().as_str(), "b" | "back") {
        StepOutcome::Back
    } else {
        StepOutcome::Continue
    }
}

/// Run the wizard on stdin/stdout and deliver the result
pub fn run_wizard(
    storage: &Storage,
    settings: &Settings,
    monitor: &mut PerformanceMonitor,
) -> ReportResult<()> {
    let today = chrono::Local::now().date_naive();
    let mut wizard = WizardController::starting_on(today, settings.default_format);
    let records = storage.records.get_all()?;
    let generator = SimulatedGenerator::new(settings.generation_delay());

    let stdin = io::stdin();
    let mut prompts = InteractiveWizard::new(stdin.lock(), io::stdout());
    let Some(report) = prompts.run(&mut wizard, &generator, &records)? else {
        return Ok(());
    };

    let service = DeliveryService::new(storage, settings);
    let delivery = monitor.measure("export", || service.deliver_report(&report))?;

    println!();
    println!("{}", format_report_summary(&report));
    if let Some(note) = delivery.artifact.stand_in {
        println!("Note: {}", note);
    }
    println!("Report saved to: {}", delivery.path.display());
    Ok(())
}

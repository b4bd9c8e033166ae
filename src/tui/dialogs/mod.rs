//! Modal dialogs for the TUI

pub mod help;
pub mod report_wizard;

pub use report_wizard::{ConfigField, ReportWizardState, WizardAction};

//! Report wizard
//!
//! The step controller and the generator seam it hands finished
//! configurations to.

pub mod controller;
pub mod generator;

pub use controller::{WizardController, WizardStep};
pub use generator::{build_report, GeneratedReport, PeriodComparison, ReportGenerator, SimulatedGenerator};

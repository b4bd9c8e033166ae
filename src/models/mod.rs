//! Core data models for esg-report
//!
//! Report vocabulary, templates, the wizard's report configuration and the
//! production records that feed exports.

pub mod config;
pub mod ids;
pub mod production;
pub mod report;
pub mod template;

pub use config::ReportConfig;
pub use ids::ReportId;
pub use production::{EfficiencyBand, ProductionRecord, ProductionTotals};
pub use report::{ReportFormat, ReportPeriod, ReportType};
pub use template::ReportTemplate;

//! Display formatting for terminal output
//!
//! Tables for records, templates and history, plus the plain-text report
//! rendering.

pub mod history;
pub mod records;
pub mod report;
pub mod templates;

pub use history::format_history_table;
pub use records::{format_record_table, format_totals_line};
pub use report::{
    format_change, format_config_review, format_percentage, format_report_summary, format_volume,
};
pub use templates::format_template_table;

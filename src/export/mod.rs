//! Export module for esg-report
//!
//! Serializes production records and generated reports:
//! - CSV: fixed header plus one line per record
//! - JSON: pretty-printed, two-space indentation
//! - Excel: CSV content under an `.xlsx` name
//!
//! Artifacts are delivered by writing them into the export directory.

pub mod artifact;
pub mod csv;
pub mod json;
pub mod report;

use std::path::{Path, PathBuf};

use tracing::error;

use crate::error::{ReportError, ReportResult};

pub use artifact::{ExportArtifact, RECORDS_FILE_PREFIX, REPORT_FILE_PREFIX};
pub use csv::{production_csv, CsvQuoting, PRODUCTION_CSV_HEADER};
pub use json::{import_from_json, production_json};

/// Message shown to the user when an export fails
pub const EXPORT_FAILED_MESSAGE: &str = "Export failed. Please try again.";

/// Build an artifact and deliver it into `dir`
///
/// Any failure while building or writing is logged with its cause and
/// replaced by a generic export error carrying `EXPORT_FAILED_MESSAGE`.
pub fn export_to<F>(dir: &Path, build: F) -> ReportResult<(ExportArtifact, PathBuf)>
where
    F: FnOnce() -> ReportResult<ExportArtifact>,
{
    let result = build().and_then(|artifact| {
        let path = artifact.deliver(dir)?;
        Ok((artifact, path))
    });

    result.map_err(|e| {
        error!(error = %e, dir = %dir.display(), "export failed");
        ReportError::Export(EXPORT_FAILED_MESSAGE.to_string())
    })
}

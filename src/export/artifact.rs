//! Export artifacts
//!
//! An artifact is generated content plus the file name and MIME type it is
//! offered under. Delivering an artifact writes it into a directory.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::{ReportError, ReportResult};
use crate::models::{ProductionRecord, ReportFormat};
use crate::storage::file_io::write_text_atomic;
use crate::wizard::GeneratedReport;

use super::csv::{production_csv, CsvQuoting};
use super::json::production_json;
use super::report::{report_csv, report_json, report_text};

/// File name prefix of generated reports
pub const REPORT_FILE_PREFIX: &str = "environmental-report";

/// File name prefix of production record exports
pub const RECORDS_FILE_PREFIX: &str = "production-data";

const CSV_MIME: &str = "text/csv;charset=utf-8";
const JSON_MIME: &str = "application/json";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const TEXT_MIME: &str = "text/plain;charset=utf-8";

/// File extension and MIME type of an artifact in the given format
pub fn file_kind(format: ReportFormat) -> (&'static str, &'static str) {
    match format {
        ReportFormat::Csv => ("csv", CSV_MIME),
        ReportFormat::Json => ("json", JSON_MIME),
        ReportFormat::Excel => ("xlsx", XLSX_MIME),
        ReportFormat::Pdf => ("txt", TEXT_MIME),
    }
}

/// Note attached to artifacts whose bytes are not in the format their name suggests
fn stand_in_note(format: ReportFormat) -> Option<&'static str> {
    match format {
        ReportFormat::Excel => Some("Excel export contains CSV text, not a binary workbook"),
        ReportFormat::Pdf => Some("PDF rendering is unavailable; the report is written as plain text"),
        ReportFormat::Csv | ReportFormat::Json => None,
    }
}

/// Generated content ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
    pub format: ReportFormat,
    /// Set when the content is a stand-in for the requested format
    pub stand_in: Option<&'static str>,
}

impl ExportArtifact {
    /// Build a production data artifact named after `date`
    ///
    /// # Errors
    ///
    /// PDF is not offered for record exports.
    pub fn records(
        records: &[ProductionRecord],
        format: ReportFormat,
        date: NaiveDate,
        quoting: CsvQuoting,
    ) -> ReportResult<Self> {
        let content = match format {
            ReportFormat::Csv | ReportFormat::Excel => production_csv(records, quoting)?,
            ReportFormat::Json => production_json(records)?,
            ReportFormat::Pdf => {
                return Err(ReportError::Export(
                    "Production data can be exported as CSV, Excel or JSON only".into(),
                ))
            }
        };
        let (ext, mime_type) = file_kind(format);

        Ok(Self {
            file_name: format!("{}-{}.{}", RECORDS_FILE_PREFIX, date.format("%Y-%m-%d"), ext),
            mime_type,
            content,
            format,
            stand_in: stand_in_note(format),
        })
    }

    /// Build a report artifact in the report's configured format
    pub fn report(report: &GeneratedReport, quoting: CsvQuoting) -> ReportResult<Self> {
        let format = report.configuration.format;
        let content = match format {
            ReportFormat::Csv | ReportFormat::Excel => report_csv(report, quoting)?,
            ReportFormat::Json => report_json(report)?,
            ReportFormat::Pdf => report_text(report),
        };
        let (ext, mime_type) = file_kind(format);

        Ok(Self {
            file_name: format!(
                "{}-{}.{}",
                REPORT_FILE_PREFIX,
                report.generated_at.timestamp_millis(),
                ext
            ),
            mime_type,
            content,
            format,
            stand_in: stand_in_note(format),
        })
    }

    /// Number of bytes in the content
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Write the artifact into `dir` and return its path
    pub fn deliver(&self, dir: &Path) -> ReportResult<PathBuf> {
        if let Some(note) = self.stand_in {
            warn!(file = %self.file_name, "{}", note);
        }

        let path = dir.join(&self.file_name);
        write_text_atomic(&path, &self.content)
            .map_err(|e| ReportError::Export(e.to_string()))?;

        info!(
            path = %path.display(),
            mime = self.mime_type,
            bytes = self.size(),
            "artifact delivered"
        );
        Ok(path)
    }
}

//! Artifact delivery service
//!
//! Builds record and report artifacts, writes them to the export directory
//! and records each delivery in the history log. Shared by the CLI commands
//! and the dashboard.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::warn;

use crate::config::settings::Settings;
use crate::error::ReportResult;
use crate::export::{export_to, ExportArtifact};
use crate::history::{HistoryEntry, HistoryLog};
use crate::models::ReportFormat;
use crate::storage::Storage;
use crate::wizard::GeneratedReport;

/// A delivered artifact and where it landed
#[derive(Debug, Clone)]
pub struct Delivery {
    pub artifact: ExportArtifact,
    pub path: PathBuf,
}

/// Service for delivering artifacts
pub struct DeliveryService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
    output_dir: Option<PathBuf>,
}

impl<'a> DeliveryService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self {
            storage,
            settings,
            output_dir: None,
        }
    }

    /// Deliver into `dir` instead of the configured export directory
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    pub fn target_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.settings.export_dir(self.storage.paths()))
    }

    /// Export every stored record, naming the file after `today`
    pub fn export_records(&self, format: ReportFormat, today: NaiveDate) -> ReportResult<Delivery> {
        let records = self.storage.records.get_all()?;
        let quoting = self.settings.csv_quoting;

        let (artifact, path) = export_to(&self.target_dir(), || {
            ExportArtifact::records(&records, format, today, quoting)
        })?;

        self.log_history(HistoryEntry::exported(&artifact.file_name, format, records.len()));
        Ok(Delivery { artifact, path })
    }

    /// Deliver a generated report in its configured format
    pub fn deliver_report(&self, report: &GeneratedReport) -> ReportResult<Delivery> {
        let quoting = self.settings.csv_quoting;

        let (artifact, path) = export_to(&self.target_dir(), || {
            ExportArtifact::report(report, quoting)
        })?;

        self.log_history(HistoryEntry::generated(
            &artifact.file_name,
            report.configuration.format,
            report.configuration.report_type,
            report.production.record_count,
        ));
        Ok(Delivery { artifact, path })
    }

    pub fn history(&self) -> HistoryLog {
        HistoryLog::new(self.storage.paths().history_log())
    }

    // A history write failure does not undo a delivered artifact
    fn log_history(&self, entry: HistoryEntry) {
        if let Err(e) = self.history().append(&entry) {
            warn!(error = %e, "failed to record history entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ReportPaths;
    use crate::export::EXPORT_FAILED_MESSAGE;
    use crate::history::HistoryKind;
    use crate::models::ReportConfig;
    use crate::storage::sample_records;
    use crate::wizard::build_report;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_export_records_writes_file_and_history() {
        let (temp_dir, storage) = create_test_storage();
        storage
            .records
            .extend(sample_records(3, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
            .unwrap();
        let settings = Settings::default();
        let service = DeliveryService::new(&storage, &settings);

        let delivery = service.export_records(ReportFormat::Csv, day()).unwrap();

        assert_eq!(
            delivery.path,
            temp_dir.path().join("exports").join("production-data-2024-01-31.csv")
        );
        let content = std::fs::read_to_string(&delivery.path).unwrap();
        assert_eq!(content.lines().count(), 4);

        let history = service.history().read_all().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kind, HistoryKind::Exported);
        assert_eq!(history[0].record_count, 3);
    }

    #[test]
    fn test_pdf_record_export_fails_without_history() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let service = DeliveryService::new(&storage, &settings);

        let err = service.export_records(ReportFormat::Pdf, day()).unwrap_err();

        assert!(err.to_string().contains(EXPORT_FAILED_MESSAGE));
        assert!(service.history().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_deliver_report_to_custom_dir() {
        let (temp_dir, storage) = create_test_storage();
        let settings = Settings::default();
        let out = temp_dir.path().join("out");
        let service = DeliveryService::new(&storage, &settings).with_output_dir(Some(out.clone()));

        let mut config = ReportConfig::new(day());
        config.format = ReportFormat::Json;
        config.fill_default_sections();
        let report = build_report(&config, &[], Utc::now());

        let delivery = service.deliver_report(&report).unwrap();
        assert!(delivery.path.starts_with(&out));
        assert!(delivery.artifact.file_name.starts_with("environmental-report-"));

        let history = service.history().read_all().unwrap();
        assert_eq!(history[0].kind, HistoryKind::Generated);
    }
}

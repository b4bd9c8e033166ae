//! User settings for esg-report
//!
//! Manages export preferences, the simulated generation delay and the
//! dashboard loader chunk size.

use std::path::PathBuf;
use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use crate::error::ReportError;
use crate::export::CsvQuoting;
use crate::models::ReportFormat;

/// User settings for esg-report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Format preselected when the wizard opens
    #[serde(default)]
    pub default_format: ReportFormat,

    /// Overrides the export directory under the base dir
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,

    /// Fixed wait applied by the simulated report generator
    #[serde(default = "default_generation_delay_ms")]
    pub generation_delay_ms: u64,

    /// Quoting policy for CSV fields
    #[serde(default)]
    pub csv_quoting: CsvQuoting,

    /// Number of records the dashboard loads per tick
    #[serde(default = "default_loader_chunk_size")]
    pub loader_chunk_size: usize,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_generation_delay_ms() -> u64 {
    1500
}

fn default_loader_chunk_size() -> usize {
    25
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// True when every specifier in `fmt` is one chrono understands
fn is_valid_date_format(fmt: &str) -> bool {
    !StrftimeItems::new(fmt).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_format: ReportFormat::default(),
            export_dir: None,
            generation_delay_ms: default_generation_delay_ms(),
            csv_quoting: CsvQuoting::default(),
            loader_chunk_size: default_loader_chunk_size(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Directory artifacts are delivered to
    pub fn export_dir(&self, paths: &ReportPaths) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths.export_dir())
    }

    pub fn generation_delay(&self) -> Duration {
        Duration::from_millis(self.generation_delay_ms)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, ReportError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ReportError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ReportError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.loader_chunk_size == 0 {
                return Err(ReportError::Config(
                    "loader_chunk_size must be greater than zero".into(),
                ));
            }

            if !is_valid_date_format(&settings.date_format) {
                return Err(ReportError::Config(format!(
                    "date_format '{}' is not a valid strftime format",
                    settings.date_format
                )));
            }

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ReportError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ReportError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_format, ReportFormat::Pdf);
        assert_eq!(settings.csv_quoting, CsvQuoting::Never);
        assert_eq!(settings.generation_delay(), Duration::from_millis(1500));
        assert_eq!(settings.loader_chunk_size, 25);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.default_format = ReportFormat::Json;
        settings.csv_quoting = CsvQuoting::Minimal;
        settings.generation_delay_ms = 0;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_format, ReportFormat::Json);
        assert_eq!(loaded.csv_quoting, CsvQuoting::Minimal);
        assert_eq!(loaded.generation_delay_ms, 0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"default_format": "csv"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.default_format, ReportFormat::Csv);
        assert_eq!(loaded.loader_chunk_size, 25);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"loader_chunk_size": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_unknown_date_specifier_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));

        std::fs::write(paths.settings_file(), r#"{"date_format": "%d/%m/%Y"}"#).unwrap();
        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_export_dir_override() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        assert_eq!(settings.export_dir(&paths), paths.export_dir());

        settings.export_dir = Some(temp_dir.path().join("out"));
        assert_eq!(settings.export_dir(&paths), temp_dir.path().join("out"));
    }
}

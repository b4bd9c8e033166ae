//! History entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ReportFormat, ReportType};

/// What produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKind {
    /// A report was generated through the wizard
    Generated,
    /// Production records were exported
    Exported,
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryKind::Generated => write!(f, "GENERATED"),
            HistoryKind::Exported => write!(f, "EXPORTED"),
        }
    }
}

/// A single history log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// When the artifact was written (UTC)
    pub timestamp: DateTime<Utc>,

    pub kind: HistoryKind,

    /// File name of the delivered artifact
    pub file: String,

    pub format: ReportFormat,

    /// Only set for generated reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<ReportType>,

    /// Records that went into the artifact
    pub record_count: usize,
}

impl HistoryEntry {
    /// Create an entry for a generated report
    pub fn generated(
        file: impl Into<String>,
        format: ReportFormat,
        report_type: ReportType,
        record_count: usize,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: HistoryKind::Generated,
            file: file.into(),
            format,
            report_type: Some(report_type),
            record_count,
        }
    }

    /// Create an entry for a record export
    pub fn exported(file: impl Into<String>, format: ReportFormat, record_count: usize) -> Self {
        Self {
            timestamp: Utc::now(),
            kind: HistoryKind::Exported,
            file: file.into(),
            format,
            report_type: None,
            record_count,
        }
    }

    /// Format the entry as a single human-readable line
    pub fn format_human_readable(&self) -> String {
        let mut line = format!(
            "[{}] {} {} ({}, {} records)",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.kind,
            self.file,
            self.format,
            self.record_count
        );
        if let Some(report_type) = self.report_type {
            line.push_str(&format!(" [{}]", report_type));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(HistoryKind::Generated.to_string(), "GENERATED");
        assert_eq!(HistoryKind::Exported.to_string(), "EXPORTED");
    }

    #[test]
    fn test_exported_entry_has_no_report_type() {
        let entry = HistoryEntry::exported("production-data-2024-01-31.csv", ReportFormat::Csv, 3);
        assert_eq!(entry.kind, HistoryKind::Exported);
        assert!(entry.report_type.is_none());

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("reportType"));
        assert!(json.contains("\"kind\":\"exported\""));
    }

    #[test]
    fn test_human_readable_includes_report_type() {
        let entry = HistoryEntry::generated(
            "environmental-report-1.json",
            ReportFormat::Json,
            ReportType::Carbon,
            10,
        );
        let line = entry.format_human_readable();
        assert!(line.contains("GENERATED"));
        assert!(line.contains("environmental-report-1.json"));
        assert!(line.ends_with("[Carbon]"));
    }
}

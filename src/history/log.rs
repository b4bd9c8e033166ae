//! Append-only history log
//!
//! Each generated report or record export is written as one JSON line
//! (JSONL) and flushed immediately.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{ReportError, ReportResult};

use super::entry::HistoryEntry;

/// Handles writing history entries to the history log file
pub struct HistoryLog {
    log_path: PathBuf,
}

impl HistoryLog {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry as a JSON line
    pub fn append(&self, entry: &HistoryEntry) -> ReportResult<()> {
        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ReportError::Io(format!("Failed to create history directory: {}", e)))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| ReportError::Io(format!("Failed to open history log: {}", e)))?;

        let json = serde_json::to_string(entry)
            .map_err(|e| ReportError::Json(format!("Failed to serialize history entry: {}", e)))?;

        writeln!(file, "{}", json)
            .map_err(|e| ReportError::Io(format!("Failed to write history entry: {}", e)))?;

        file.flush()
            .map_err(|e| ReportError::Io(format!("Failed to flush history log: {}", e)))?;

        Ok(())
    }

    /// Read all entries, oldest first
    pub fn read_all(&self) -> ReportResult<Vec<HistoryEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| ReportError::Io(format!("Failed to open history log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| {
                ReportError::Io(format!("Failed to read history line {}: {}", line_num + 1, e))
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: HistoryEntry = serde_json::from_str(&line).map_err(|e| {
                ReportError::Json(format!(
                    "Failed to parse history entry at line {}: {}",
                    line_num + 1,
                    e
                ))
            })?;

            entries.push(entry);
        }

        Ok(entries)
    }

    /// Read the most recent `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ReportResult<Vec<HistoryEntry>> {
        let all_entries = self.read_all()?;
        let start = all_entries.len().saturating_sub(count);
        Ok(all_entries[start..].to_vec())
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReportFormat, ReportType};
    use tempfile::TempDir;

    fn create_test_log() -> (TempDir, HistoryLog) {
        let temp_dir = TempDir::new().unwrap();
        let log = HistoryLog::new(temp_dir.path().join("history.log"));
        (temp_dir, log)
    }

    #[test]
    fn test_empty_log() {
        let (_temp_dir, log) = create_test_log();
        assert!(log.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_read() {
        let (_temp_dir, log) = create_test_log();
        log.append(&HistoryEntry::exported("a.csv", ReportFormat::Csv, 2))
            .unwrap();
        log.append(&HistoryEntry::generated(
            "b.json",
            ReportFormat::Json,
            ReportType::Esg,
            5,
        ))
        .unwrap();

        let entries = log.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].file, "a.csv");
        assert_eq!(entries[1].report_type, Some(ReportType::Esg));
    }

    #[test]
    fn test_read_recent() {
        let (_temp_dir, log) = create_test_log();
        for i in 0..5 {
            log.append(&HistoryEntry::exported(format!("{}.csv", i), ReportFormat::Csv, i))
                .unwrap();
        }

        let recent = log.read_recent(2).unwrap();
        let files: Vec<&str> = recent.iter().map(|e| e.file.as_str()).collect();
        assert_eq!(files, vec!["3.csv", "4.csv"]);

        assert_eq!(log.read_recent(50).unwrap().len(), 5);
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let (temp_dir, log) = create_test_log();
        log.append(&HistoryEntry::exported("a.csv", ReportFormat::Csv, 1))
            .unwrap();
        let mut file = OpenOptions::new()
            .append(true)
            .open(temp_dir.path().join("history.log"))
            .unwrap();
        writeln!(file, "not json").unwrap();

        let err = log.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}

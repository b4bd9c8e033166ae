//! Production data import service
//!
//! Reads production records from the CSV layout produced by record exports
//! (same header) or from a JSON records array, validates every row, and
//! merges the valid rows into storage.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{ReportError, ReportResult};
use crate::export::import_from_json;
use crate::models::ProductionRecord;
use crate::storage::Storage;

/// One CSV row, keyed by the export header names
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Facility ID")]
    facility_id: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Oil Production (bbl/day)")]
    oil_production: f64,
    #[serde(rename = "Gas Production (mcf/day)")]
    gas_production: f64,
    #[serde(rename = "Efficiency (%)")]
    efficiency: f64,
}

impl CsvRow {
    fn into_record(self) -> Result<ProductionRecord, String> {
        let timestamp = DateTime::parse_from_rfc3339(self.timestamp.trim())
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| format!("Invalid timestamp '{}': {}", self.timestamp, e))?;

        ProductionRecord::new(
            self.id.trim(),
            self.facility_id.trim(),
            timestamp,
            self.oil_production,
            self.gas_production,
            self.efficiency,
        )
        .map_err(|e| e.to_string())
    }
}

/// A parsed row, or the reason it was rejected, keyed by its file line number
pub type ParsedRow = (usize, Result<ProductionRecord, String>);

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Records whose ID was not present before
    pub imported: usize,
    /// Records that replaced an existing record with the same ID
    pub replaced: usize,
    /// Rejected rows by line number
    pub error_messages: BTreeMap<usize, String>,
}

impl ImportResult {
    pub fn errors(&self) -> usize {
        self.error_messages.len()
    }
}

/// Service for importing production data
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse CSV rows; the header is line 1 so the first data row is line 2
    pub fn parse_csv<R: Read>(&self, input: R) -> ReportResult<Vec<ParsedRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(input);

        // Fail early on a foreign header rather than rejecting every row
        let headers = reader.headers()?.clone();
        for required in ["ID", "Facility ID", "Timestamp"] {
            if !headers.iter().any(|h| h == required) {
                return Err(ReportError::Csv(format!(
                    "Missing required column '{}' in CSV header",
                    required
                )));
            }
        }

        // Line numbers come from the reader so quoted multi-line fields count
        let rows = reader
            .records()
            .map(|row| match row {
                Ok(raw) => {
                    let line = raw.position().map_or(0, |p| p.line() as usize);
                    let parsed = raw
                        .deserialize::<CsvRow>(Some(&headers))
                        .map_err(|e| format!("Error reading CSV record: {}", e))
                        .and_then(CsvRow::into_record);
                    (line, parsed)
                }
                Err(e) => {
                    let line = e.position().map_or(0, |p| p.line() as usize);
                    (line, Err(format!("Error reading CSV record: {}", e)))
                }
            })
            .collect();

        Ok(rows)
    }

    /// Import a CSV stream, keeping valid rows and reporting the rest
    pub fn import_csv<R: Read>(&self, input: R) -> ReportResult<ImportResult> {
        let rows = self.parse_csv(input)?;

        let mut result = ImportResult::default();
        let mut valid = Vec::new();
        for (line, parsed) in rows {
            match parsed {
                Ok(record) => valid.push(record),
                Err(message) => {
                    warn!(line, %message, "skipping invalid row");
                    result.error_messages.insert(line, message);
                }
            }
        }

        self.merge(valid, result)
    }

    /// Import a JSON records array; any invalid record rejects the whole file
    pub fn import_json(&self, json: &str) -> ReportResult<ImportResult> {
        let records = import_from_json(json)?;
        self.merge(records, ImportResult::default())
    }

    /// Import a file, choosing the parser by extension (`.json`, otherwise CSV)
    pub fn import_file(&self, path: &Path) -> ReportResult<ImportResult> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), is_json, "importing production data");

        if is_json {
            let content = std::fs::read_to_string(path)?;
            self.import_json(&content)
        } else {
            let file = std::fs::File::open(path)?;
            self.import_csv(file)
        }
    }

    fn merge(
        &self,
        records: Vec<ProductionRecord>,
        mut result: ImportResult,
    ) -> ReportResult<ImportResult> {
        let total = records.len();
        result.imported = self.storage.records.extend(records)?;
        result.replaced = total - result.imported;
        self.storage.records.save()?;

        info!(
            imported = result.imported,
            replaced = result.replaced,
            errors = result.errors(),
            "import complete"
        );
        Ok(result)
    }
}

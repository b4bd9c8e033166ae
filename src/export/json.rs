//! JSON Export functionality
//!
//! Pretty-prints records and report summaries with two-space indentation.

use serde::Serialize;
use std::io::Write;

use crate::error::{ReportError, ReportResult};
use crate::models::ProductionRecord;

/// Write any serializable value as pretty JSON
pub fn write_pretty_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> ReportResult<()> {
    serde_json::to_writer_pretty(writer, value).map_err(|e| ReportError::Export(e.to_string()))
}

/// Render production records as a JSON array
pub fn production_json(records: &[ProductionRecord]) -> ReportResult<String> {
    let mut buffer = Vec::new();
    write_pretty_json(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|e| ReportError::Export(e.to_string()))
}

/// Parse a production record export back into validated records
pub fn import_from_json(json_str: &str) -> ReportResult<Vec<ProductionRecord>> {
    let records: Vec<ProductionRecord> = serde_json::from_str(json_str)?;

    for record in &records {
        record.validate()?;
    }

    Ok(records)
}

//! CSV Export functionality
//!
//! Writes production records as CSV. Lines are joined with `\n` and the
//! output carries no trailing newline.

use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ReportError, ReportResult};
use crate::models::ProductionRecord;

/// Header line of a production record export
pub const PRODUCTION_CSV_HEADER: &str =
    "ID,Facility ID,Timestamp,Oil Production (bbl/day),Gas Production (mcf/day),Efficiency (%)";

/// How field values are quoted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    /// Fields are written verbatim; embedded commas are not escaped
    #[default]
    Never,
    /// Fields containing a comma, quote or newline are quoted
    Minimal,
}

/// Write production records as CSV
pub fn write_production_csv<W: Write>(
    writer: &mut W,
    records: &[ProductionRecord],
    quoting: CsvQuoting,
) -> ReportResult<()> {
    write!(writer, "{}", PRODUCTION_CSV_HEADER).map_err(|e| ReportError::Export(e.to_string()))?;

    for record in records {
        let line = format_row(
            &[
                record.id.as_str(),
                record.facility_id.as_str(),
                record.timestamp_iso().as_str(),
                record.oil_production.to_string().as_str(),
                record.gas_production.to_string().as_str(),
                record.efficiency.to_string().as_str(),
            ],
            quoting,
        )?;
        write!(writer, "\n{}", line).map_err(|e| ReportError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Render production records as a CSV string
pub fn production_csv(records: &[ProductionRecord], quoting: CsvQuoting) -> ReportResult<String> {
    let mut buffer = Vec::new();
    write_production_csv(&mut buffer, records, quoting)?;
    String::from_utf8(buffer).map_err(|e| ReportError::Export(e.to_string()))
}

/// Write `Field,Value` rows
pub fn write_key_value_csv<W: Write>(
    writer: &mut W,
    rows: &[(&str, String)],
    quoting: CsvQuoting,
) -> ReportResult<()> {
    write!(writer, "Field,Value").map_err(|e| ReportError::Export(e.to_string()))?;

    for (field, value) in rows {
        let line = format_row(&[*field, value.as_str()], quoting)?;
        write!(writer, "\n{}", line).map_err(|e| ReportError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Join one row's fields under the quoting policy, without a line terminator
pub fn format_row(fields: &[&str], quoting: CsvQuoting) -> ReportResult<String> {
    match quoting {
        CsvQuoting::Never => Ok(fields.join(",")),
        CsvQuoting::Minimal => {
            let mut writer = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Necessary)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(Vec::new());
            writer.write_record(fields)?;
            let bytes = writer
                .into_inner()
                .map_err(|e| ReportError::Export(e.to_string()))?;

            let mut line =
                String::from_utf8(bytes).map_err(|e| ReportError::Export(e.to_string()))?;
            if line.ends_with('\n') {
                line.pop();
            }
            Ok(line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, facility: &str) -> ProductionRecord {
        ProductionRecord::new(
            id,
            facility,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            100.0,
            200.0,
            90.0,
        )
        .unwrap()
    }

    #[test]
    fn test_single_record_output() {
        let csv = production_csv(&[record("p1", "F1")], CsvQuoting::Never).unwrap();
        assert_eq!(
            csv,
            "ID,Facility ID,Timestamp,Oil Production (bbl/day),Gas Production (mcf/day),Efficiency (%)\np1,F1,2024-01-01T00:00:00Z,100,200,90"
        );
    }

    #[test]
    fn test_line_count_is_records_plus_header() {
        let records: Vec<_> = (0..7).map(|i| record(&format!("p{}", i), "F1")).collect();
        let csv = production_csv(&records, CsvQuoting::Never).unwrap();
        assert_eq!(csv.lines().count(), 8);
    }

    #[test]
    fn test_empty_input_is_header_only() {
        let csv = production_csv(&[], CsvQuoting::Never).unwrap();
        assert_eq!(csv, PRODUCTION_CSV_HEADER);
    }

    #[test]
    fn test_fractional_values() {
        let mut r = record("p1", "F1");
        r.oil_production = 1234.5;
        r.efficiency = 87.25;
        let csv = production_csv(&[r], CsvQuoting::Never).unwrap();
        assert!(csv.ends_with("p1,F1,2024-01-01T00:00:00Z,1234.5,200,87.25"));
    }

    #[test]
    fn test_never_quoting_keeps_commas() {
        let csv = production_csv(&[record("p1", "North, Field")], CsvQuoting::Never).unwrap();
        assert!(csv.contains("\np1,North, Field,"));
    }

    #[test]
    fn test_minimal_quoting_escapes() {
        let csv = production_csv(&[record("p1", "North, \"A\"")], CsvQuoting::Minimal).unwrap();
        assert!(csv.contains("\np1,\"North, \"\"A\"\"\","));
    }

    #[test]
    fn test_minimal_quoting_leaves_plain_fields() {
        let line = format_row(&["p1", "F1", "100"], CsvQuoting::Minimal).unwrap();
        assert_eq!(line, "p1,F1,100");

        let line = format_row(&["a\nb", "c"], CsvQuoting::Minimal).unwrap();
        assert_eq!(line, "\"a\nb\",c");
    }

    #[test]
    fn test_key_value_rows() {
        let mut out = Vec::new();
        let rows = [("Title", "Q1".to_string()), ("Sections", "A, B".to_string())];
        write_key_value_csv(&mut out, &rows, CsvQuoting::Minimal).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Field,Value\nTitle,Q1\nSections,\"A, B\""
        );
    }
}

//! Production record display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{ProductionRecord, ProductionTotals};

use super::report::{format_percentage, format_volume};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Facility")]
    facility: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Oil (bbl/day)")]
    oil: String,
    #[tabled(rename = "Gas (mcf/day)")]
    gas: String,
    #[tabled(rename = "Efficiency")]
    efficiency: String,
    #[tabled(rename = "Band")]
    band: String,
}

impl From<&ProductionRecord> for RecordRow {
    fn from(record: &ProductionRecord) -> Self {
        Self {
            id: record.id.clone(),
            facility: record.facility_id.clone(),
            timestamp: record.timestamp_iso(),
            oil: format_volume(record.oil_production),
            gas: format_volume(record.gas_production),
            efficiency: format_percentage(record.efficiency),
            band: record.efficiency_band().to_string(),
        }
    }
}

/// Format production records as a table
pub fn format_record_table(records: &[ProductionRecord]) -> String {
    if records.is_empty() {
        return "No production records found. Run `esgreport data seed` to add sample data."
            .to_string();
    }

    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// One-line totals shown under the record table
pub fn format_totals_line(totals: &ProductionTotals) -> String {
    let efficiency = totals
        .average_efficiency
        .map(format_percentage)
        .unwrap_or_else(|| "n/a".to_string());

    format!(
        "{} records across {} facilities | Oil: {} bbl/day | Gas: {} mcf/day | Avg efficiency: {}",
        totals.record_count,
        totals.facility_count,
        format_volume(totals.total_oil_production),
        format_volume(totals.total_gas_production),
        efficiency
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_empty_table() {
        assert!(format_record_table(&[]).starts_with("No production records"));
    }

    #[test]
    fn test_table_contains_values() {
        let record = ProductionRecord::new(
            "p1",
            "F1",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            1250.0,
            200.0,
            92.0,
        )
        .unwrap();

        let table = format_record_table(&[record]);
        assert!(table.contains("Facility"));
        assert!(table.contains("1,250"));
        assert!(table.contains("High"));
    }

    #[test]
    fn test_totals_line_without_records() {
        let line = format_totals_line(&ProductionTotals::default());
        assert!(line.contains("0 records"));
        assert!(line.ends_with("n/a"));
    }
}

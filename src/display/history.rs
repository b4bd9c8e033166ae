//! History display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::history::HistoryEntry;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "When (UTC)")]
    when: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Format")]
    format: String,
    #[tabled(rename = "Type")]
    report_type: String,
    #[tabled(rename = "Records")]
    records: usize,
}

/// Format history entries, newest first
pub fn format_history_table(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No reports or exports yet.".to_string();
    }

    let rows: Vec<HistoryRow> = entries
        .iter()
        .rev()
        .map(|e| HistoryRow {
            when: e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            kind: e.kind.to_string(),
            file: e.file.clone(),
            format: e.format.to_string(),
            report_type: e
                .report_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            records: e.record_count,
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportFormat;

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history_table(&[]), "No reports or exports yet.");
    }

    #[test]
    fn test_newest_first() {
        let entries = vec![
            HistoryEntry::exported("first.csv", ReportFormat::Csv, 1),
            HistoryEntry::exported("second.csv", ReportFormat::Csv, 2),
        ];
        let table = format_history_table(&entries);
        let first = table.find("first.csv").unwrap();
        let second = table.find("second.csv").unwrap();
        assert!(second < first);
    }
}

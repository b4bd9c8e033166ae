//! Generated report rendering
//!
//! Turns a `GeneratedReport` into artifact content for each report format.

use crate::display::report::{format_percentage, format_report_summary};
use crate::error::{ReportError, ReportResult};
use crate::wizard::GeneratedReport;

use super::csv::{write_key_value_csv, CsvQuoting};
use super::json::write_pretty_json;

/// Render the report summary object as pretty JSON
pub fn report_json(report: &GeneratedReport) -> ReportResult<String> {
    let mut buffer = Vec::new();
    write_pretty_json(&mut buffer, report)?;
    String::from_utf8(buffer).map_err(|e| ReportError::Export(e.to_string()))
}

/// Render the report summary as `Field,Value` CSV rows
pub fn report_csv(report: &GeneratedReport, quoting: CsvQuoting) -> ReportResult<String> {
    let config = &report.configuration;
    let sections: Vec<&str> = config.sections().iter().map(String::as_str).collect();

    let mut rows: Vec<(&str, String)> = vec![
        ("Report ID", report.id.to_string()),
        ("Title", report.title.clone()),
        ("Report Type", config.report_type.to_string()),
        ("Period", config.period.to_string()),
        ("Start Date", config.start_date().to_string()),
        ("End Date", config.end_date().to_string()),
        ("Generated At", report.generated_at.to_rfc3339()),
        ("Sections", sections.join("; ")),
        ("Recipients", config.recipients().join("; ")),
        ("Include Charts", config.include_charts.to_string()),
        ("Include Recommendations", config.include_recommendations.to_string()),
        ("Include Comparison", config.include_comparison.to_string()),
        ("Records", report.production.record_count.to_string()),
        ("Facilities", report.production.facility_count.to_string()),
        ("Oil Production (bbl/day)", report.production.total_oil_production.to_string()),
        ("Gas Production (mcf/day)", report.production.total_gas_production.to_string()),
        (
            "Average Efficiency (%)",
            report
                .production
                .average_efficiency
                .map(format_percentage)
                .unwrap_or_default(),
        ),
    ];

    if let Some(comparison) = &report.comparison {
        rows.push((
            "Previous Oil Production (bbl/day)",
            comparison.previous.total_oil_production.to_string(),
        ));
        rows.push((
            "Oil Change (%)",
            comparison.oil_change_pct.map(|p| p.to_string()).unwrap_or_default(),
        ));
        rows.push((
            "Previous Gas Production (mcf/day)",
            comparison.previous.total_gas_production.to_string(),
        ));
        rows.push((
            "Gas Change (%)",
            comparison.gas_change_pct.map(|p| p.to_string()).unwrap_or_default(),
        ));
    }

    for rec in &report.recommendations {
        rows.push(("Recommendation", rec.clone()));
    }

    let mut buffer = Vec::new();
    write_key_value_csv(&mut buffer, &rows, quoting)?;
    String::from_utf8(buffer).map_err(|e| ReportError::Export(e.to_string()))
}

/// Plain-text rendering used in place of a PDF document
pub fn report_text(report: &GeneratedReport) -> String {
    format_report_summary(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportConfig;
    use crate::wizard::build_report;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn report() -> GeneratedReport {
        let mut config = ReportConfig::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        config.fill_default_sections();
        config.add_recipient("ops@example.com");
        config.include_comparison = true;
        build_report(&config, &[], Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn test_report_json_roundtrip() {
        let original = report();
        let json = report_json(&original).unwrap();
        let parsed: GeneratedReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
        assert!(json.contains("\n  \"configuration\": {"));
    }

    #[test]
    fn test_report_csv_rows() {
        let csv = report_csv(&report(), CsvQuoting::Never).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Field,Value");
        assert!(lines.contains(&"Report Type,Environmental"));
        assert!(lines.contains(&"Recipients,ops@example.com"));
        assert!(lines.iter().any(|l| l.starts_with("Oil Change (%),")));
    }

    #[test]
    fn test_report_text() {
        let r = report();
        assert!(report_text(&r).contains(&r.title));
    }
}

//! Report formatting utilities for terminal output
//!
//! Renders generated reports and wizard configurations as plain text. The
//! same rendering backs the plain-text stand-in for PDF artifacts.

use crate::models::{ProductionTotals, ReportConfig};
use crate::wizard::GeneratedReport;

/// Format a production figure with thousands separators and no decimals
pub fn format_volume(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Format a signed change, e.g. "+12.5%"
pub fn format_change(pct: Option<f64>) -> String {
    match pct {
        Some(p) if p > 0.0 => format!("+{}", format_percentage(p)),
        Some(p) => format_percentage(p),
        None => "n/a".to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Format the configuration as shown on the review step
pub fn format_config_review(config: &ReportConfig) -> String {
    let mut output = String::new();
    output.push_str(&format!("Report Type:     {}\n", config.report_type));
    output.push_str(&format!("Period:          {}\n", config.period));
    output.push_str(&format!(
        "Date Range:      {} to {}\n",
        config.start_date(),
        config.end_date()
    ));
    output.push_str(&format!("Format:          {}\n", config.format));
    output.push_str(&format!("Sections ({}):\n", config.sections().len()));
    for section in config.sections() {
        output.push_str(&format!("  - {}\n", section));
    }
    if config.recipients().is_empty() {
        output.push_str("Recipients:      (none)\n");
    } else {
        output.push_str(&format!("Recipients:      {}\n", config.recipients().join(", ")));
    }
    output.push_str(&format!("Include Charts:  {}\n", yes_no(config.include_charts)));
    output.push_str(&format!(
        "Recommendations: {}\n",
        yes_no(config.include_recommendations)
    ));
    output.push_str(&format!(
        "Comparison:      {}\n",
        yes_no(config.include_comparison)
    ));
    output
}

fn format_totals(totals: &ProductionTotals) -> String {
    let mut output = String::new();
    output.push_str(&format!("  Records:            {}\n", totals.record_count));
    output.push_str(&format!("  Facilities:         {}\n", totals.facility_count));
    output.push_str(&format!(
        "  Oil (bbl/day):      {}\n",
        format_volume(totals.total_oil_production)
    ));
    output.push_str(&format!(
        "  Gas (mcf/day):      {}\n",
        format_volume(totals.total_gas_production)
    ));
    output.push_str(&format!(
        "  Avg Efficiency:     {}\n",
        totals
            .average_efficiency
            .map(format_percentage)
            .unwrap_or_else(|| "n/a".to_string())
    ));
    output
}

/// Format a generated report as a plain-text document
pub fn format_report_summary(report: &GeneratedReport) -> String {
    let rule = "=".repeat(report.title.len().max(40));
    let mut output = String::new();

    output.push_str(&format!("{}\n{}\n{}\n", rule, report.title, rule));
    output.push_str(&format!("Report ID:       {}\n", report.id));
    output.push_str(&format!(
        "Generated:       {}\n\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format_config_review(&report.configuration));

    output.push_str("\nProduction\n");
    output.push_str(&format_totals(&report.production));

    if let Some(comparison) = &report.comparison {
        output.push_str("\nPrevious Period\n");
        output.push_str(&format_totals(&comparison.previous));
        output.push_str(&format!(
            "  Oil change:         {}\n",
            format_change(comparison.oil_change_pct)
        ));
        output.push_str(&format!(
            "  Gas change:         {}\n",
            format_change(comparison.gas_change_pct)
        ));
    }

    if !report.recommendations.is_empty() {
        output.push_str("\nRecommendations\n");
        for (i, rec) in report.recommendations.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, rec));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::build_report;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(999.4), "999");
        assert_eq!(format_volume(1234567.0), "1,234,567");
        assert_eq!(format_volume(-1500.0), "-1,500");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(5.55), "5.5%");
        assert_eq!(format_percentage(87.4), "87%");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(Some(12.0)), "+12%");
        assert_eq!(format_change(Some(-3.3)), "-3.3%");
        assert_eq!(format_change(None), "n/a");
    }

    #[test]
    fn test_review_lists_sections_and_recipients() {
        let mut config = ReportConfig::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        config.fill_default_sections();
        config.add_recipient("ops@example.com");

        let text = format_config_review(&config);
        assert!(text.contains("Report Type:     Environmental"));
        assert!(text.contains("  - Water Management"));
        assert!(text.contains("ops@example.com"));
    }

    #[test]
    fn test_summary_contains_title_and_totals() {
        let mut config = ReportConfig::new(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        config.fill_default_sections();
        let report = build_report(
            &config,
            &[],
            Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap(),
        );

        let text = format_report_summary(&report);
        assert!(text.contains(&report.title));
        assert!(text.contains("Generated:       2024-02-01 09:00:00 UTC"));
        assert!(text.contains("Records:            0"));
        assert!(text.contains("Recommendations"));
    }
}

//! Report generation
//!
//! `ReportGenerator` is the seam between the wizard and whatever produces the
//! finished report. `SimulatedGenerator` stands in for a real reporting
//! service: it waits a fixed delay and then assembles the summary locally.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ReportResult;
use crate::models::{
    EfficiencyBand, ProductionRecord, ProductionTotals, ReportConfig, ReportId, ReportTemplate,
};

/// A finished report summary derived from a configuration and the records in its window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedReport {
    pub id: ReportId,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub configuration: ReportConfig,
    /// Totals for records inside the configured window
    pub production: ProductionTotals,
    /// Present when the configuration asks for a comparison
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<PeriodComparison>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

/// Totals for the window of equal length immediately before the report window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub previous: ProductionTotals,
    /// Percent change in oil output, `None` when the previous window had none
    pub oil_change_pct: Option<f64>,
    pub gas_change_pct: Option<f64>,
}

/// Produces a finished report from a configuration
pub trait ReportGenerator {
    fn generate(
        &self,
        config: &ReportConfig,
        records: &[ProductionRecord],
    ) -> ReportResult<GeneratedReport>;
}

/// Waits a fixed, non-cancellable delay and then builds the report locally
#[derive(Debug, Clone, Copy)]
pub struct SimulatedGenerator {
    delay: Duration,
}

impl SimulatedGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl ReportGenerator for SimulatedGenerator {
    fn generate(
        &self,
        config: &ReportConfig,
        records: &[ProductionRecord],
    ) -> ReportResult<GeneratedReport> {
        debug!(delay_ms = self.delay.as_millis() as u64, "simulating report generation");
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let report = build_report(config, records, Utc::now());
        info!(
            report_id = %report.id,
            report_type = config.report_type.slug(),
            records = report.production.record_count,
            "report generated"
        );
        Ok(report)
    }
}

/// Assemble a report summary at time `now`
pub fn build_report(
    config: &ReportConfig,
    records: &[ProductionRecord],
    now: DateTime<Utc>,
) -> GeneratedReport {
    let start = config.start_date();
    let end = config.end_date();
    let in_window: Vec<ProductionRecord> = records
        .iter()
        .filter(|r| r.date() >= start && r.date() <= end)
        .cloned()
        .collect();
    let production = ProductionTotals::from_records(&in_window);

    let comparison = if config.include_comparison {
        let span = end.signed_duration_since(start) + ChronoDuration::days(1);
        let prev_end = start - ChronoDuration::days(1);
        let prev_start = start - span;
        let previous_records: Vec<ProductionRecord> = records
            .iter()
            .filter(|r| r.date() >= prev_start && r.date() <= prev_end)
            .cloned()
            .collect();
        let previous = ProductionTotals::from_records(&previous_records);
        Some(PeriodComparison {
            oil_change_pct: percent_change(previous.total_oil_production, production.total_oil_production),
            gas_change_pct: percent_change(previous.total_gas_production, production.total_gas_production),
            previous,
        })
    } else {
        None
    };

    let recommendations = if config.include_recommendations {
        recommend(&in_window, &production)
    } else {
        Vec::new()
    };

    let template = ReportTemplate::for_type(config.report_type);

    GeneratedReport {
        id: ReportId::new(),
        title: format!("{} ({} to {})", template.name, start, end),
        generated_at: now,
        configuration: config.clone(),
        production,
        comparison,
        recommendations,
    }
}

fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

fn recommend(records: &[ProductionRecord], totals: &ProductionTotals) -> Vec<String> {
    let mut out = Vec::new();

    if totals.record_count == 0 {
        out.push("No production data in the reporting window; verify facility data feeds.".to_string());
        return out;
    }

    let mut low: Vec<&str> = records
        .iter()
        .filter(|r| r.efficiency_band() == EfficiencyBand::Low)
        .map(|r| r.facility_id.as_str())
        .collect();
    low.sort_unstable();
    low.dedup();

    if !low.is_empty() {
        out.push(format!(
            "Schedule efficiency reviews for facilities below 75%: {}.",
            low.join(", ")
        ));
    }

    match totals.average_efficiency.map(EfficiencyBand::classify) {
        Some(EfficiencyBand::High) => {
            out.push("Fleet efficiency is above 90%; maintain current operating practices.".to_string())
        }
        Some(EfficiencyBand::Moderate) => out.push(
            "Target a fleet-wide efficiency improvement to reach the 90% band.".to_string(),
        ),
        Some(EfficiencyBand::Low) => out.push(
            "Fleet efficiency is below 75%; prioritise maintenance and flaring reduction.".to_string(),
        ),
        None => {}
    }

    out
}

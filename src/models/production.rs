//! Production record model
//!
//! A single facility production reading. Records are read-only input to the
//! exporter and the report generator.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::{ReportError, ReportResult};

/// One production reading for a facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRecord {
    pub id: String,

    pub facility_id: String,

    /// Reading time in UTC
    pub timestamp: DateTime<Utc>,

    /// Barrels per day, never negative
    #[serde(serialize_with = "serialize_number")]
    pub oil_production: f64,

    /// Thousand cubic feet per day, never negative
    #[serde(serialize_with = "serialize_number")]
    pub gas_production: f64,

    /// Percentage in [0, 100]
    #[serde(serialize_with = "serialize_number")]
    pub efficiency: f64,
}

/// Write whole values without a fractional part, matching the CSV rendering
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    // Largest magnitude an f64 holds every integer up to
    const EXACT_LIMIT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < EXACT_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl ProductionRecord {
    /// Create a validated record
    pub fn new(
        id: impl Into<String>,
        facility_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        oil_production: f64,
        gas_production: f64,
        efficiency: f64,
    ) -> ReportResult<Self> {
        let record = Self {
            id: id.into(),
            facility_id: facility_id.into(),
            timestamp,
            oil_production,
            gas_production,
            efficiency,
        };
        record.validate()?;
        Ok(record)
    }

    /// Validate identifiers and numeric bounds
    pub fn validate(&self) -> ReportResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReportError::Validation("Record ID cannot be empty".into()));
        }
        if self.facility_id.trim().is_empty() {
            return Err(ReportError::Validation(format!(
                "Record {} has no facility ID",
                self.id
            )));
        }
        if !self.oil_production.is_finite() || self.oil_production < 0.0 {
            return Err(ReportError::Validation(format!(
                "Record {}: oil production must be a non-negative number, got {}",
                self.id, self.oil_production
            )));
        }
        if !self.gas_production.is_finite() || self.gas_production < 0.0 {
            return Err(ReportError::Validation(format!(
                "Record {}: gas production must be a non-negative number, got {}",
                self.id, self.gas_production
            )));
        }
        if !(0.0..=100.0).contains(&self.efficiency) {
            return Err(ReportError::Validation(format!(
                "Record {}: efficiency must be between 0 and 100, got {}",
                self.id, self.efficiency
            )));
        }
        Ok(())
    }

    /// RFC 3339 timestamp with a `Z` suffix and no fractional seconds unless present
    pub fn timestamp_iso(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    /// Calendar date of the reading
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn efficiency_band(&self) -> EfficiencyBand {
        EfficiencyBand::classify(self.efficiency)
    }
}

/// Coarse efficiency classification used for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyBand {
    /// 90% and above
    High,
    /// 75% up to 90%
    Moderate,
    /// Below 75%
    Low,
}

impl EfficiencyBand {
    pub fn classify(efficiency: f64) -> Self {
        if efficiency >= 90.0 {
            Self::High
        } else if efficiency >= 75.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for EfficiencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "High"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Low => write!(f, "Low"),
        }
    }
}

/// Aggregate figures over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionTotals {
    pub record_count: usize,
    pub facility_count: usize,
    #[serde(serialize_with = "serialize_number")]
    pub total_oil_production: f64,
    #[serde(serialize_with = "serialize_number")]
    pub total_gas_production: f64,
    /// Mean efficiency, `None` when there are no records
    pub average_efficiency: Option<f64>,
}

impl ProductionTotals {
    pub fn from_records(records: &[ProductionRecord]) -> Self {
        if records.is_empty() {
            return Self::default();
        }

        let mut facilities: Vec<&str> = records.iter().map(|r| r.facility_id.as_str()).collect();
        facilities.sort_unstable();
        facilities.dedup();

        let total_efficiency: f64 = records.iter().map(|r| r.efficiency).sum();

        Self {
            record_count: records.len(),
            facility_count: facilities.len(),
            total_oil_production: records.iter().map(|r| r.oil_production).sum(),
            total_gas_production: records.iter().map(|r| r.gas_production).sum(),
            average_efficiency: Some(total_efficiency / records.len() as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_record() {
        let record = ProductionRecord::new("p1", "F1", ts(), 100.0, 200.0, 90.0).unwrap();
        assert_eq!(record.timestamp_iso(), "2024-01-01T00:00:00Z");
        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(record.efficiency_band(), EfficiencyBand::High);
    }

    #[test]
    fn test_rejects_negative_production() {
        let err = ProductionRecord::new("p1", "F1", ts(), -1.0, 200.0, 90.0).unwrap_err();
        assert!(err.is_validation());
        let err = ProductionRecord::new("p1", "F1", ts(), 1.0, -0.5, 90.0).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_rejects_out_of_range_efficiency() {
        assert!(ProductionRecord::new("p1", "F1", ts(), 1.0, 1.0, 100.5).is_err());
        assert!(ProductionRecord::new("p1", "F1", ts(), 1.0, 1.0, f64::NAN).is_err());
        assert!(ProductionRecord::new("p1", "F1", ts(), 1.0, 1.0, 100.0).is_ok());
        assert!(ProductionRecord::new("p1", "F1", ts(), 1.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_blank_ids() {
        assert!(ProductionRecord::new("", "F1", ts(), 1.0, 1.0, 50.0).is_err());
        assert!(ProductionRecord::new("p1", " ", ts(), 1.0, 1.0, 50.0).is_err());
    }

    #[test]
    fn test_efficiency_bands() {
        assert_eq!(EfficiencyBand::classify(95.0), EfficiencyBand::High);
        assert_eq!(EfficiencyBand::classify(90.0), EfficiencyBand::High);
        assert_eq!(EfficiencyBand::classify(80.0), EfficiencyBand::Moderate);
        assert_eq!(EfficiencyBand::classify(74.9), EfficiencyBand::Low);
    }

    #[test]
    fn test_totals() {
        let records = vec![
            ProductionRecord::new("p1", "F1", ts(), 100.0, 200.0, 90.0).unwrap(),
            ProductionRecord::new("p2", "F2", ts(), 50.0, 100.0, 80.0).unwrap(),
            ProductionRecord::new("p3", "F1", ts(), 25.0, 50.0, 70.0).unwrap(),
        ];
        let totals = ProductionTotals::from_records(&records);

        assert_eq!(totals.record_count, 3);
        assert_eq!(totals.facility_count, 2);
        assert_eq!(totals.total_oil_production, 175.0);
        assert_eq!(totals.total_gas_production, 350.0);
        assert_eq!(totals.average_efficiency, Some(80.0));
    }

    #[test]
    fn test_totals_empty() {
        let totals = ProductionTotals::from_records(&[]);
        assert_eq!(totals.record_count, 0);
        assert_eq!(totals.average_efficiency, None);
    }

    #[test]
    fn test_json_field_names() {
        let record = ProductionRecord::new("p1", "F1", ts(), 100.0, 200.0, 90.0).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["facilityId"], "F1");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00Z");
        assert_eq!(json["oilProduction"], 100.0);
    }
}

//! Report vocabulary
//!
//! Report types, reporting periods and output formats shared by the wizard,
//! the exporter and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of report the wizard produces. Each kind owns exactly one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Environmental,
    Esg,
    Carbon,
    Sustainability,
    Compliance,
}

impl ReportType {
    /// All report types in template display order
    pub const ALL: [ReportType; 5] = [
        Self::Environmental,
        Self::Esg,
        Self::Carbon,
        Self::Sustainability,
        Self::Compliance,
    ];

    /// Parse report type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "environmental" | "env" => Some(Self::Environmental),
            "esg" => Some(Self::Esg),
            "carbon" | "emissions" => Some(Self::Carbon),
            "sustainability" => Some(Self::Sustainability),
            "compliance" | "regulatory" => Some(Self::Compliance),
            _ => None,
        }
    }

    /// Lowercase identifier as used on the command line and in JSON
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Esg => "esg",
            Self::Carbon => "carbon",
            Self::Sustainability => "sustainability",
            Self::Compliance => "compliance",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environmental => write!(f, "Environmental"),
            Self::Esg => write!(f, "ESG"),
            Self::Carbon => write!(f, "Carbon"),
            Self::Sustainability => write!(f, "Sustainability"),
            Self::Compliance => write!(f, "Compliance"),
        }
    }
}

/// Reporting cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Monthly,
    Quarterly,
    Annual,
}

impl ReportPeriod {
    pub const ALL: [ReportPeriod; 3] = [Self::Monthly, Self::Quarterly, Self::Annual];

    /// Parse period from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Some(Self::Monthly),
            "quarterly" | "quarter" => Some(Self::Quarterly),
            "annual" | "annually" | "yearly" | "year" => Some(Self::Annual),
            _ => None,
        }
    }

    /// The period after this one, wrapping around
    pub fn cycle(self) -> Self {
        match self {
            Self::Monthly => Self::Quarterly,
            Self::Quarterly => Self::Annual,
            Self::Annual => Self::Monthly,
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::Annual => write!(f, "Annual"),
        }
    }
}

/// Output format of a generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Pdf,
    Excel,
    Csv,
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 4] = [Self::Pdf, Self::Excel, Self::Csv, Self::Json];

    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "excel" | "xlsx" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// The format after this one, wrapping around
    pub fn cycle(self) -> Self {
        match self {
            Self::Pdf => Self::Excel,
            Self::Excel => Self::Csv,
            Self::Csv => Self::Json,
            Self::Json => Self::Pdf,
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Excel => write!(f, "Excel"),
            Self::Csv => write!(f, "CSV"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_type_parse() {
        assert_eq!(ReportType::parse("ESG"), Some(ReportType::Esg));
        assert_eq!(ReportType::parse(" carbon "), Some(ReportType::Carbon));
        assert_eq!(ReportType::parse("financial"), None);
    }

    #[test]
    fn test_slug_round_trips_through_parse() {
        for report_type in ReportType::ALL {
            assert_eq!(ReportType::parse(report_type.slug()), Some(report_type));
        }
    }

    #[test]
    fn test_period_cycle_visits_all() {
        let mut period = ReportPeriod::Monthly;
        for _ in 0..ReportPeriod::ALL.len() {
            period = period.cycle();
        }
        assert_eq!(period, ReportPeriod::Monthly);
    }

    #[test]
    fn test_format_serialization() {
        let json = serde_json::to_string(&ReportFormat::Excel).unwrap();
        assert_eq!(json, "\"excel\"");
        assert_eq!(ReportFormat::parse("xlsx"), Some(ReportFormat::Excel));
    }
}

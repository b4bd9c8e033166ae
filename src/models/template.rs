//! Report templates
//!
//! Every report type has one template bundling a name, a description and the
//! sections a report of that type starts with.

use super::report::ReportType;

/// A predefined bundle of report sections for one report type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTemplate {
    pub report_type: ReportType,
    pub name: &'static str,
    pub description: &'static str,
    pub default_sections: &'static [&'static str],
}

const ENVIRONMENTAL: ReportTemplate = ReportTemplate {
    report_type: ReportType::Environmental,
    name: "Environmental Impact Report",
    description: "Emissions, water, waste and biodiversity impact across facilities",
    default_sections: &[
        "Executive Summary",
        "Emissions Overview",
        "Water Management",
        "Waste Management",
        "Biodiversity Impact",
    ],
};

const ESG: ReportTemplate = ReportTemplate {
    report_type: ReportType::Esg,
    name: "ESG Performance Report",
    description: "Environmental, social and governance performance scorecard",
    default_sections: &[
        "Executive Summary",
        "Environmental Performance",
        "Social Responsibility",
        "Governance",
        "ESG Scores",
    ],
};

const CARBON: ReportTemplate = ReportTemplate {
    report_type: ReportType::Carbon,
    name: "Carbon Footprint Report",
    description: "Scope 1, 2 and 3 emissions with reduction targets",
    default_sections: &[
        "Executive Summary",
        "Scope 1 Emissions",
        "Scope 2 Emissions",
        "Scope 3 Emissions",
        "Reduction Targets",
    ],
};

const SUSTAINABILITY: ReportTemplate = ReportTemplate {
    report_type: ReportType::Sustainability,
    name: "Sustainability Report",
    description: "Progress against sustainability goals and initiatives",
    default_sections: &[
        "Executive Summary",
        "Sustainability Goals",
        "Energy Efficiency",
        "Community Impact",
        "Future Initiatives",
    ],
};

const COMPLIANCE: ReportTemplate = ReportTemplate {
    report_type: ReportType::Compliance,
    name: "Regulatory Compliance Report",
    description: "Permit status, incidents and audit findings",
    default_sections: &[
        "Executive Summary",
        "Regulatory Overview",
        "Permit Status",
        "Incident Reports",
        "Audit Findings",
    ],
};

impl ReportTemplate {
    /// Look up the template for a report type
    pub fn for_type(report_type: ReportType) -> &'static ReportTemplate {
        match report_type {
            ReportType::Environmental => &ENVIRONMENTAL,
            ReportType::Esg => &ESG,
            ReportType::Carbon => &CARBON,
            ReportType::Sustainability => &SUSTAINABILITY,
            ReportType::Compliance => &COMPLIANCE,
        }
    }

    /// All templates in display order
    pub fn all() -> impl Iterator<Item = &'static ReportTemplate> {
        ReportType::ALL.into_iter().map(Self::for_type)
    }

    /// Every section offered by any template, deduplicated, in first-seen order
    pub fn section_catalog() -> Vec<&'static str> {
        let mut catalog: Vec<&'static str> = Vec::new();
        for template in Self::all() {
            for section in template.default_sections {
                if !catalog.contains(section) {
                    catalog.push(section);
                }
            }
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_type_maps_to_its_template() {
        for report_type in ReportType::ALL {
            assert_eq!(ReportTemplate::for_type(report_type).report_type, report_type);
        }
    }

    #[test]
    fn test_templates_have_sections() {
        for template in ReportTemplate::all() {
            assert!(!template.default_sections.is_empty(), "{}", template.name);
        }
    }

    #[test]
    fn test_section_catalog_is_deduplicated() {
        let catalog = ReportTemplate::section_catalog();
        let summaries = catalog.iter().filter(|s| **s == "Executive Summary").count();
        assert_eq!(summaries, 1);
        assert!(catalog.contains(&"Audit Findings"));
    }
}

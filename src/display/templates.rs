//! Report template display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::ReportTemplate;

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "Type")]
    slug: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
    #[tabled(rename = "Default Sections")]
    sections: String,
}

/// Format every template with its default sections
pub fn format_template_table() -> String {
    let rows: Vec<TemplateRow> = ReportTemplate::all()
        .map(|t| TemplateRow {
            slug: t.report_type.slug(),
            name: t.name,
            description: t.description,
            sections: t.default_sections.join("\n"),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_all_templates() {
        let table = format_template_table();
        for template in ReportTemplate::all() {
            assert!(table.contains(template.name));
        }
        assert!(table.contains("Executive Summary"));
    }
}

//! Production dashboard
//!
//! KPI cards over the records loaded so far and a scrolling record table
//! with efficiency-band colouring. While the loader is still running a
//! progress gauge sits above the table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::{format_percentage, format_volume};
use crate::models::EfficiencyBand;
use crate::tui::app::App;
use crate::tui::layout::kpi_cards;
use crate::tui::theme;

/// Render the KPI cards
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let totals = app.totals();
    let cards = kpi_cards(area, 4);

    let efficiency = match totals.average_efficiency {
        Some(avg) => Span::styled(
            format_percentage(avg),
            theme::efficiency_style(EfficiencyBand::classify(avg)).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("n/a", Style::default().fg(theme::MUTED)),
    };

    let kpis = [
        (
            "Records",
            Span::styled(
                format!("{} ({} facilities)", totals.record_count, totals.facility_count),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ),
        (
            "Oil (bbl/day)",
            Span::styled(
                format_volume(totals.total_oil_production),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ),
        (
            "Gas (mcf/day)",
            Span::styled(
                format_volume(totals.total_gas_production),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ),
        ("Avg Efficiency", efficiency),
    ];

    for ((title, value), card) in kpis.into_iter().zip(cards) {
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));
        let paragraph = Paragraph::new(vec![Line::from(""), Line::from(value)])
            .block(block)
            .centered();
        frame.render_widget(paragraph, card);
    }
}

/// Render the record table, with a load gauge while records are arriving
pub fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let table_area = if app.is_loading() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);
        let (loaded, total) = app.load_counts();
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(theme::ACCENT).bg(Color::Black))
            .ratio(app.load_progress().clamp(0.0, 1.0))
            .label(format!("Loading {}/{}", loaded, total));
        frame.render_widget(gauge, chunks[0]);
        chunks[1]
    } else {
        area
    };

    let block = Block::default()
        .title(format!(" Production Records ({}) ", app.records.len()))
        .title_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));

    if app.records.is_empty() && !app.is_loading() {
        let text = Paragraph::new(Span::styled(
            "No production records. Run `esgreport data seed` or `esgreport data import <file>`.",
            Style::default().fg(theme::MUTED),
        ))
        .block(block);
        frame.render_widget(text, table_area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID"),
        Cell::from("Facility"),
        Cell::from("Date"),
        Cell::from(Line::from("Oil (bbl/day)").right_aligned()),
        Cell::from(Line::from("Gas (mcf/day)").right_aligned()),
        Cell::from(Line::from("Efficiency").right_aligned()),
        Cell::from("Band"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    .bottom_margin(1);

    let rows: Vec<Row> = app
        .records
        .iter()
        .map(|record| {
            let band = record.efficiency_band();
            Row::new(vec![
                Cell::from(record.id.clone()),
                Cell::from(record.facility_id.clone()),
                Cell::from(
                    record
                        .timestamp
                        .format(&app.settings.date_format)
                        .to_string(),
                ),
                Cell::from(Line::from(format_volume(record.oil_production)).right_aligned()),
                Cell::from(Line::from(format_volume(record.gas_production)).right_aligned()),
                Cell::from(
                    Line::from(format_percentage(record.efficiency))
                        .right_aligned()
                        .style(theme::efficiency_style(band)),
                ),
                Cell::from(Span::styled(band.to_string(), theme::efficiency_style(band))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(11),
        Constraint::Min(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = TableState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(table, table_area, &mut state);
}

//! Status bar view
//!
//! Shows load state, the export format the `e` key will use, the latest
//! report and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;
use crate::tui::theme;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![];

    if app.is_loading() {
        let (loaded, total) = app.load_counts();
        spans.push(Span::styled(
            format!(" Loading {}/{} ", loaded, total),
            Style::default().fg(Color::Yellow),
        ));
    } else {
        spans.push(Span::styled(" Ready ", Style::default().fg(Color::Green)));
    }

    spans.push(Span::raw("│ "));
    spans.push(Span::styled("Export: ", Style::default().fg(Color::White)));
    spans.push(Span::styled(
        app.export_format.to_string(),
        Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
    ));

    if app.is_generating() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Generating report...", Style::default().fg(Color::Yellow)));
    } else if let Some(ref report) = app.last_report {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("Last: {}", report.title),
            Style::default().fg(Color::White),
        ));
    }

    let hints = " w:wizard  e:export  f:format  ?:help  q:quit ";
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(used + hints.len());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(hints, Style::default().fg(theme::MUTED)));

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

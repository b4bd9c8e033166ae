//! Help dialog
//!
//! Lists the dashboard and wizard keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme;

/// Render the help dialog
pub fn render(frame: &mut Frame) {
    let area = centered_rect_fixed(60, 28, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));

    let paragraph = Paragraph::new(help_lines())
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn help_lines() -> Vec<Line<'static>> {
    vec![
        heading("Dashboard"),
        Line::from(""),
        key_line("q", "Quit"),
        key_line("?", "Show/hide help"),
        key_line("j/k", "Move selection down/up"),
        key_line("g/G", "Jump to first/last record"),
        key_line("w", "Open the report wizard"),
        key_line("f", "Cycle export format"),
        key_line("e", "Export all records"),
        key_line("d", "Dismiss notification"),
        Line::from(""),
        heading("Report Wizard"),
        Line::from(""),
        key_line("Enter", "Next step / generate"),
        key_line("Esc", "Previous step / cancel"),
        key_line("Up/Down", "Move between fields"),
        key_line("Left/Right", "Change value, move date a day"),
        key_line("PgUp/PgDn", "Move date a week"),
        key_line("Space", "Toggle section or option"),
        key_line("Backspace", "Remove last recipient"),
    ]
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD).fg(Color::Yellow),
    ))
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(theme::ACCENT)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}

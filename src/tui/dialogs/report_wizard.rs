//! Report wizard dialog
//!
//! Walks the three wizard steps inside a popup. Key handling lives on
//! `ReportWizardState` and reports back a `WizardAction`; the app owns the
//! background generation that `WizardAction::Generate` starts.

use chrono::{Duration, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::display::{format_config_review, format_report_summary};
use crate::models::{ReportFormat, ReportTemplate, ReportType};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::theme;
use crate::tui::widgets::TextInput;
use crate::wizard::{WizardController, WizardStep};

/// Number of section rows visible at once
const SECTION_WINDOW: usize = 6;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Editable fields on the configure step, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Period,
    StartDate,
    EndDate,
    Format,
    Sections,
    Recipients,
    Charts,
    Recommendations,
    Comparison,
}

impl ConfigField {
    pub const ALL: [ConfigField; 9] = [
        Self::Period,
        Self::StartDate,
        Self::EndDate,
        Self::Format,
        Self::Sections,
        Self::Recipients,
        Self::Charts,
        Self::Recommendations,
        Self::Comparison,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Period => "Period",
            Self::StartDate => "Start date",
            Self::EndDate => "End date",
            Self::Format => "Format",
            Self::Sections => "Sections",
            Self::Recipients => "Recipients",
            Self::Charts => "Include charts",
            Self::Recommendations => "Include recommendations",
            Self::Comparison => "Include comparison",
        }
    }
}

/// What the app should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    None,
    Close,
    Generate,
}

/// State of the wizard popup
#[derive(Debug, Clone)]
pub struct ReportWizardState {
    pub controller: WizardController,
    pub template_index: usize,
    pub field: ConfigField,
    pub section_cursor: usize,
    pub recipient_input: TextInput,
    /// Last validation message, cleared by the next successful edit
    pub error: Option<String>,
    sections: Vec<&'static str>,
    today: NaiveDate,
}

impl ReportWizardState {
    pub fn new(today: NaiveDate, format: ReportFormat) -> Self {
        Self {
            controller: WizardController::starting_on(today, format),
            template_index: 0,
            field: ConfigField::Period,
            section_cursor: 0,
            recipient_input: TextInput::new().placeholder("type an address, Enter to add"),
            error: None,
            sections: ReportTemplate::section_catalog(),
            today,
        }
    }

    /// Start a fresh session, keeping the chosen format
    pub fn reset(&mut self, today: NaiveDate) {
        let format = self.controller.config().format;
        *self = Self::new(today, format);
    }

    pub fn step(&self) -> WizardStep {
        self.controller.step()
    }

    /// Section names in display order
    pub fn section_catalog(&self) -> &[&'static str] {
        &self.sections
    }

    pub fn handle_key(&mut self, key: KeyCode) -> WizardAction {
        if self.controller.report_generated() {
            return match key {
                KeyCode::Char('n') => {
                    self.reset(self.today);
                    WizardAction::None
                }
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => WizardAction::Close,
                _ => WizardAction::None,
            };
        }

        match self.controller.step() {
            WizardStep::Template => self.handle_template_key(key),
            WizardStep::Configure => self.handle_configure_key(key),
            WizardStep::Review => self.handle_review_key(key),
        }
    }

    fn handle_template_key(&mut self, key: KeyCode) -> WizardAction {
        let count = ReportType::ALL.len();
        match key {
            KeyCode::Esc => return WizardAction::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.template_index = (self.template_index + count - 1) % count;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.template_index = (self.template_index + 1) % count;
            }
            KeyCode::Enter => {
                self.controller
                    .select_template(ReportType::ALL[self.template_index]);
                self.controller.advance();
                self.field = ConfigField::Period;
            }
            _ => {}
        }
        WizardAction::None
    }

    fn handle_configure_key(&mut self, key: KeyCode) -> WizardAction {
        match key {
            KeyCode::Esc => {
                self.error = None;
                self.controller.retreat();
            }
            KeyCode::Up | KeyCode::BackTab => self.field = self.field.prev(),
            KeyCode::Down | KeyCode::Tab => self.field = self.field.next(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageUp => self.shift_date(-7),
            KeyCode::PageDown => self.shift_date(7),
            KeyCode::Enter => {
                if self.field == ConfigField::Recipients && !self.recipient_input.is_empty() {
                    let email = self.recipient_input.value().to_string();
                    self.controller.config_mut().add_recipient(&email);
                    self.recipient_input.clear();
                } else {
                    self.error = None;
                    self.controller.advance();
                }
            }
            KeyCode::Backspace if self.field == ConfigField::Recipients => {
                if self.recipient_input.is_empty() {
                    let last = self.controller.config().recipients().last().cloned();
                    if let Some(last) = last {
                        self.controller.config_mut().remove_recipient(&last);
                    }
                } else {
                    self.recipient_input.backspace();
                }
            }
            KeyCode::Char(c) if self.field == ConfigField::Recipients => {
                self.recipient_input.insert(c);
            }
            KeyCode::Char(' ') => self.toggle(),
            _ => {}
        }
        WizardAction::None
    }

    fn handle_review_key(&mut self, key: KeyCode) -> WizardAction {
        match key {
            KeyCode::Esc => {
                self.error = None;
                self.controller.retreat();
                WizardAction::None
            }
            KeyCode::Enter | KeyCode::Char('g') => match self.controller.config().validate() {
                Ok(()) => {
                    self.error = None;
                    WizardAction::Generate
                }
                Err(e) => {
                    self.error = Some(e.to_string());
                    WizardAction::None
                }
            },
            _ => WizardAction::None,
        }
    }

    /// Left/Right on the focused field
    fn adjust(&mut self, delta: i64) {
        match self.field {
            ConfigField::StartDate | ConfigField::EndDate => self.shift_date(delta),
            ConfigField::Sections => {
                let len = self.sections.len();
                if len > 0 {
                    self.section_cursor = if delta < 0 {
                        (self.section_cursor + len - 1) % len
                    } else {
                        (self.section_cursor + 1) % len
                    };
                }
            }
            ConfigField::Recipients => {
                if delta < 0 {
                    self.recipient_input.move_left();
                } else {
                    self.recipient_input.move_right();
                }
            }
            ConfigField::Period
            | ConfigField::Format
            | ConfigField::Charts
            | ConfigField::Recommendations
            | ConfigField::Comparison => self.toggle(),
        }
    }

    /// Space on the focused field
    fn toggle(&mut self) {
        let config = self.controller.config_mut();
        match self.field {
            ConfigField::Period => config.period = config.period.cycle(),
            ConfigField::Format => config.format = config.format.cycle(),
            ConfigField::Sections => {
                if let Some(name) = self.sections.get(self.section_cursor) {
                    config.toggle_section(name);
                }
            }
            ConfigField::Charts => config.include_charts = !config.include_charts,
            ConfigField::Recommendations => {
                config.include_recommendations = !config.include_recommendations
            }
            ConfigField::Comparison => config.include_comparison = !config.include_comparison,
            ConfigField::StartDate | ConfigField::EndDate | ConfigField::Recipients => {}
        }
    }

    /// Move the focused date by `days`, rejecting a window that would invert
    fn shift_date(&mut self, days: i64) {
        let config = self.controller.config_mut();
        let (mut start, mut end) = (config.start_date(), config.end_date());
        match self.field {
            ConfigField::StartDate => start += Duration::days(days),
            ConfigField::EndDate => end += Duration::days(days),
            _ => return,
        }
        match config.set_date_range(start, end) {
            Ok(()) => self.error = None,
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Render the wizard popup
pub fn render(frame: &mut Frame, app: &App) {
    let state = &app.wizard;
    let area = centered_rect_fixed(76, 28, frame.area());
    frame.render_widget(Clear, area);

    let step = state.step();
    let block = Block::default()
        .title(format!(
            " Generate Report - Step {}/{}: {} ",
            step.index() + 1,
            WizardStep::ALL.len(),
            step
        ))
        .title_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Step progress
            Constraint::Length(1),
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Error
            Constraint::Length(1), // Key hints
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(progress_line(step)), chunks[0]);

    if let Some(elapsed) = app.generation_elapsed() {
        let frame_idx = (elapsed.as_millis() / 250) as usize % SPINNER.len();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    " {} Generating report... {:.1}s",
                    SPINNER[frame_idx],
                    elapsed.as_secs_f64()
                ),
                Style::default().fg(Color::Yellow),
            )),
        ];
        frame.render_widget(Paragraph::new(text), chunks[2]);
    } else if state.controller.report_generated() {
        render_generated(frame, app, chunks[2]);
    } else {
        match step {
            WizardStep::Template => render_templates(frame, state, chunks[2]),
            WizardStep::Configure => render_configure(frame, state, chunks[2]),
            WizardStep::Review => {
                let review = format_config_review(state.controller.config());
                frame.render_widget(Paragraph::new(review).wrap(Wrap { trim: false }), chunks[2]);
            }
        }
    }

    if let Some(ref error) = state.error {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[3],
        );
    }

    frame.render_widget(Paragraph::new(hint_line(app)), chunks[4]);
}

fn progress_line(current: WizardStep) -> Line<'static> {
    let mut spans = Vec::new();
    for step in WizardStep::ALL {
        if step.index() > 0 {
            spans.push(Span::styled(" > ", Style::default().fg(theme::MUTED)));
        }
        spans.push(Span::styled(
            format!("{} {}", step.index() + 1, step),
            theme::step_style(step, current),
        ));
    }
    Line::from(spans)
}

fn render_templates(frame: &mut Frame, state: &ReportWizardState, area: Rect) {
    let mut lines = Vec::new();
    for (i, template) in ReportTemplate::all().enumerate() {
        let selected = i == state.template_index;
        let marker = if selected { "> " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, template.name),
            theme::field_style(selected),
        )));
        lines.push(Line::from(Span::styled(
            format!("    {}", template.description),
            Style::default().fg(theme::MUTED),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_configure(frame: &mut Frame, state: &ReportWizardState, area: Rect) {
    let config = state.controller.config();
    let check = |on: bool| if on { "[x]" } else { "[ ]" };

    let mut lines = Vec::new();
    for field in ConfigField::ALL {
        let focused = field == state.field;
        let value = match field {
            ConfigField::Period => config.period.to_string(),
            ConfigField::StartDate => config.start_date().to_string(),
            ConfigField::EndDate => config.end_date().to_string(),
            ConfigField::Format => config.format.to_string(),
            ConfigField::Sections => format!("{} selected", config.sections().len()),
            ConfigField::Recipients => {
                if config.recipients().is_empty() {
                    "none".to_string()
                } else {
                    config.recipients().join(", ")
                }
            }
            ConfigField::Charts => check(config.include_charts).to_string(),
            ConfigField::Recommendations => check(config.include_recommendations).to_string(),
            ConfigField::Comparison => check(config.include_comparison).to_string(),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<24}", field.label()), theme::field_style(focused)),
            Span::raw(value),
        ]));

        if focused && field == ConfigField::Sections {
            let catalog = state.section_catalog();
            let first = state
                .section_cursor
                .saturating_sub(SECTION_WINDOW / 2)
                .min(catalog.len().saturating_sub(SECTION_WINDOW));
            for (i, name) in catalog.iter().enumerate().skip(first).take(SECTION_WINDOW) {
                let style = if i == state.section_cursor {
                    Style::default().fg(Color::Black).bg(theme::ACCENT)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{} {}", check(config.has_section(name)), name), style),
                ]));
            }
        }
    }

    let list_height = lines.len() as u16;
    frame.render_widget(Paragraph::new(lines), area);

    if state.field == ConfigField::Recipients && list_height < area.height {
        let input_area = Rect::new(area.x + 4, area.y + list_height + 1, area.width.saturating_sub(4), 1);
        let mut input = state.recipient_input.clone();
        input.focused = true;
        frame.render_widget(&input, input_area);
    }
}

fn render_generated(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = match app.last_report {
        Some(ref report) => format_report_summary(report),
        None => String::new(),
    };
    if let Some(ref path) = app.last_delivery {
        text.push_str(&format!("\nSaved to: {}", path.display()));
    }
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), area);
}

fn hint_line(app: &App) -> Line<'static> {
    let hints: &[(&str, &str)] = if app.is_generating() {
        &[]
    } else if app.wizard.controller.report_generated() {
        &[("Enter", "close"), ("n", "new report")]
    } else {
        match app.wizard.step() {
            WizardStep::Template => &[("j/k", "select"), ("Enter", "next"), ("Esc", "cancel")],
            WizardStep::Configure => &[
                ("Up/Down", "field"),
                ("Left/Right", "change"),
                ("Space", "toggle"),
                ("Enter", "next"),
                ("Esc", "back"),
            ],
            WizardStep::Review => &[("Enter", "generate"), ("Esc", "back")],
        }
    };

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(key.to_string(), theme::key_hint_style()));
        spans.push(Span::raw(format!(" {}  ", action)));
    }
    Line::from(spans)
}

//! Style lookup for the dashboard
//!
//! Every colour the TUI uses for a domain state comes from here, keyed by a
//! closed enum so adding a variant forces a style decision.

use ratatui::style::{Color, Modifier, Style};

use crate::models::EfficiencyBand;
use crate::wizard::WizardStep;

use super::widgets::NotificationType;

/// Accent used for borders and titles
pub const ACCENT: Color = Color::Cyan;

/// Colour for muted text such as hints
pub const MUTED: Color = Color::DarkGray;

pub fn efficiency_color(band: EfficiencyBand) -> Color {
    match band {
        EfficiencyBand::High => Color::Green,
        EfficiencyBand::Moderate => Color::Yellow,
        EfficiencyBand::Low => Color::Red,
    }
}

pub fn efficiency_style(band: EfficiencyBand) -> Style {
    let style = Style::default().fg(efficiency_color(band));
    match band {
        EfficiencyBand::Low => style.add_modifier(Modifier::BOLD),
        EfficiencyBand::High | EfficiencyBand::Moderate => style,
    }
}

pub fn notification_color(kind: NotificationType) -> Color {
    match kind {
        NotificationType::Info => Color::Blue,
        NotificationType::Success => Color::Green,
        NotificationType::Warning => Color::Yellow,
        NotificationType::Error => Color::Red,
    }
}

/// Style of a step in the wizard's progress line, relative to the current step
pub fn step_style(step: WizardStep, current: WizardStep) -> Style {
    if step == current {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else if step < current {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Style of a form field label
pub fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

pub fn key_hint_style() -> Style {
    Style::default().fg(Color::Green)
}

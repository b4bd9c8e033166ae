//! Event handler for the TUI
//!
//! Routes key presses to the open dialog, or to the dashboard when no
//! dialog is open. Ticks drive the app's periodic update.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{ActiveDialog, App};
use super::dialogs::WizardAction;
use super::event::Event;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) => Ok(()),
        Event::Tick => {
            app.tick();
            Ok(())
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    match app.active_dialog {
        ActiveDialog::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                app.close_dialog();
            }
        }
        ActiveDialog::ReportWizard => {
            // Generation cannot be cancelled; keys wait until it finishes
            if app.is_generating() {
                return Ok(());
            }
            match app.wizard.handle_key(key.code) {
                WizardAction::None => {}
                WizardAction::Close => app.close_dialog(),
                WizardAction::Generate => app.start_generation(),
            }
        }
        ActiveDialog::None => handle_dashboard_key(app, key.code),
    }
    Ok(())
}

fn handle_dashboard_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        KeyCode::Char('w') => app.open_dialog(ActiveDialog::ReportWizard),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Char('f') => app.cycle_export_format(),
        KeyCode::Char('e') => {
            let format = app.export_format;
            app.export_records(format);
        }
        KeyCode::Char('d') => app.notifications.dismiss(),
        _ => {}
    }
}

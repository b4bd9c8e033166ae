//! Views for the TUI
//!
//! The dashboard is the only full-screen view; dialogs and the current
//! toast render on top of it.

pub mod dashboard;
pub mod status_bar;

use ratatui::Frame;

use super::app::{ActiveDialog, App};
use super::dialogs;
use super::layout::{toast_rect, DashboardLayout};
use super::widgets::NotificationWidget;

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let layout = DashboardLayout::new(frame.area());

    dashboard::render_header(frame, app, layout.header);
    dashboard::render_table(frame, app, layout.table);
    status_bar::render(frame, app, layout.status_bar);

    match app.active_dialog {
        ActiveDialog::None => {}
        ActiveDialog::Help => dialogs::help::render(frame),
        ActiveDialog::ReportWizard => dialogs::report_wizard::render(frame, app),
    }

    if let Some(notification) = app.notifications.current() {
        let area = toast_rect(44, 5, frame.area());
        frame.render_widget(NotificationWidget::new(notification), area);
    }
}

//! Terminal User Interface module
//!
//! A ratatui dashboard over the production records, with the report wizard
//! as a modal dialog. Records load in chunks on each tick and report
//! generation runs on a worker thread.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;
pub mod theme;

pub mod views;

pub mod widgets;

pub mod dialogs;

pub mod layout;

pub use app::App;
pub use terminal::run_tui;

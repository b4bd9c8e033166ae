//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events:
//! the records loaded so far, the wizard dialog, any report generation
//! running in the background and the notification queue.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::config::settings::Settings;
use crate::error::ReportResult;
use crate::export::EXPORT_FAILED_MESSAGE;
use crate::models::{ProductionRecord, ProductionTotals, ReportFormat};
use crate::monitor::PerformanceMonitor;
use crate::services::DeliveryService;
use crate::storage::{ChunkedLoader, Storage};
use crate::wizard::{GeneratedReport, SimulatedGenerator, WizardController};

use super::dialogs::ReportWizardState;
use super::widgets::{Notification, NotificationQueue};

/// Formats the dashboard can export records in, in cycle order
pub const EXPORT_FORMATS: [ReportFormat; 3] =
    [ReportFormat::Csv, ReportFormat::Json, ReportFormat::Excel];

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    Help,
    ReportWizard,
}

type GenerationOutcome = (WizardController, ReportResult<GeneratedReport>);

/// A report being generated on a worker thread
struct PendingGeneration {
    started: Instant,
    receiver: Receiver<GenerationOutcome>,
}

/// Main application state
pub struct App<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    monitor: &'a mut PerformanceMonitor,

    pub should_quit: bool,
    pub active_dialog: ActiveDialog,

    /// Records handed over by the loader so far
    pub records: Vec<ProductionRecord>,
    loader: ChunkedLoader,
    load_started: Instant,
    load_recorded: bool,

    pub selected_index: usize,
    pub export_format: ReportFormat,

    pub wizard: ReportWizardState,
    generation: Option<PendingGeneration>,
    pub last_report: Option<GeneratedReport>,
    pub last_delivery: Option<PathBuf>,

    pub notifications: NotificationQueue,
    today: NaiveDate,
}

impl<'a> App<'a> {
    pub fn new(
        storage: &'a Storage,
        settings: &'a Settings,
        monitor: &'a mut PerformanceMonitor,
        today: NaiveDate,
    ) -> Self {
        let mut notifications = NotificationQueue::new();
        let source = match storage.records.get_all() {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "failed to read production records");
                notifications.push(Notification::error(e.to_string()));
                Vec::new()
            }
        };
        debug!(
            total = source.len(),
            chunk_size = settings.loader_chunk_size,
            "starting chunked load"
        );

        Self {
            storage,
            settings,
            monitor,
            should_quit: false,
            active_dialog: ActiveDialog::None,
            records: Vec::with_capacity(source.len()),
            loader: ChunkedLoader::new(source, settings.loader_chunk_size),
            load_started: Instant::now(),
            load_recorded: false,
            selected_index: 0,
            export_format: ReportFormat::Csv,
            wizard: ReportWizardState::new(today, settings.default_format),
            generation: None,
            last_report: None,
            last_delivery: None,
            notifications,
            today,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Periodic update: take one loader chunk, poll generation, expire toasts
    pub fn tick(&mut self) {
        if let Some(chunk) = self.loader.next() {
            self.records.extend(chunk);
        }
        if self.loader.is_done() && !self.load_recorded {
            self.load_recorded = true;
            self.monitor.record("load", self.load_started.elapsed());
            info!(records = self.records.len(), "dashboard data loaded");
        }

        self.poll_generation();
        self.notifications.remove_expired();
    }

    pub fn is_loading(&self) -> bool {
        !self.loader.is_done()
    }

    /// Loaded fraction in [0.0, 1.0]
    pub fn load_progress(&self) -> f64 {
        self.loader.progress()
    }

    pub fn load_counts(&self) -> (usize, usize) {
        (self.loader.loaded(), self.loader.total())
    }

    /// Totals over the records loaded so far
    pub fn totals(&self) -> ProductionTotals {
        ProductionTotals::from_records(&self.records)
    }

    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        if dialog == ActiveDialog::ReportWizard && self.wizard.controller.report_generated() {
            self.wizard.reset(self.today);
        }
        self.active_dialog = dialog;
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    pub fn has_dialog(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.records.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.records.len().saturating_sub(1);
    }

    pub fn cycle_export_format(&mut self) {
        let pos = EXPORT_FORMATS
            .iter()
            .position(|f| *f == self.export_format)
            .unwrap_or(0);
        self.export_format = EXPORT_FORMATS[(pos + 1) % EXPORT_FORMATS.len()];
    }

    /// Export every stored record in `format` and report the result as a toast
    pub fn export_records(&mut self, format: ReportFormat) {
        let service = DeliveryService::new(self.storage, self.settings);
        let today = self.today;
        let result = self
            .monitor
            .measure("export", || service.export_records(format, today));

        match result {
            Ok(delivery) => {
                let mut message = format!(
                    "Exported {} records to {}",
                    self.storage.records.len().unwrap_or_default(),
                    delivery.artifact.file_name
                );
                if let Some(note) = delivery.artifact.stand_in {
                    message.push_str(&format!(" ({})", note));
                }
                self.notifications.push(Notification::success(message));
            }
            Err(e) => {
                error!(error = %e, format = %format, "record export failed");
                self.notifications.push(Notification::error(EXPORT_FAILED_MESSAGE));
            }
        }
    }

    pub fn is_generating(&self) -> bool {
        self.generation.is_some()
    }

    /// Time spent on the running generation, if any
    pub fn generation_elapsed(&self) -> Option<Duration> {
        self.generation.as_ref().map(|g| g.started.elapsed())
    }

    /// Generate the wizard's report on a worker thread
    ///
    /// The wizard controller is cloned into the worker and handed back with
    /// the result, so the dialog stays responsive to rendering meanwhile.
    pub fn start_generation(&mut self) {
        if self.generation.is_some() {
            return;
        }
        let records = match self.storage.records.get_all() {
            Ok(records) => records,
            Err(e) => {
                self.notifications.push(Notification::error(e.to_string()));
                return;
            }
        };

        let mut controller = self.wizard.controller.clone();
        let generator = SimulatedGenerator::new(self.settings.generation_delay());
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let result = controller.generate(&generator, &records);
            let _ = sender.send((controller, result));
        });

        info!(
            report_type = self.wizard.controller.config().report_type.slug(),
            "report generation started"
        );
        self.generation = Some(PendingGeneration {
            started: Instant::now(),
            receiver,
        });
    }

    fn poll_generation(&mut self) {
        let (received, elapsed) = match self.generation {
            Some(ref pending) => (pending.receiver.try_recv(), pending.started.elapsed()),
            None => return,
        };

        match received {
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.generation = None;
                error!("report generation worker exited without a result");
                self.notifications
                    .push(Notification::error("Report generation stopped unexpectedly"));
            }
            Ok((controller, result)) => {
                self.generation = None;
                self.monitor.record("generate", elapsed);
                match result {
                    Ok(report) => {
                        self.wizard.controller = controller;
                        self.deliver_report(report);
                    }
                    Err(e) => {
                        self.wizard.error = Some(e.to_string());
                        self.notifications.push(Notification::error(e.to_string()));
                    }
                }
            }
        }
    }

    fn deliver_report(&mut self, report: GeneratedReport) {
        let service = DeliveryService::new(self.storage, self.settings);
        let result = self
            .monitor
            .measure("export", || service.deliver_report(&report));

        match result {
            Ok(delivery) => {
                let mut message = format!("Report saved to {}", delivery.artifact.file_name);
                if let Some(note) = delivery.artifact.stand_in {
                    message.push_str(&format!(" ({})", note));
                }
                self.notifications.push(Notification::success(message));
                self.last_delivery = Some(delivery.path);
            }
            Err(e) => {
                error!(error = %e, report_id = %report.id, "report delivery failed");
                self.notifications.push(Notification::error(EXPORT_FAILED_MESSAGE));
                self.last_delivery = None;
            }
        }
        self.last_report = Some(report);
    }
}

//! Report and export history
//!
//! Every artifact delivered to the export directory is recorded in an
//! append-only JSONL log so `report history` and the dashboard can list
//! past runs.

mod entry;
mod log;

pub use entry::{HistoryEntry, HistoryKind};
pub use log::HistoryLog;

//! Storage layer for esg-report
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation, plus chunked loading and sample data.

pub mod file_io;
pub mod loader;
pub mod records;
pub mod seed;

pub use file_io::{read_json, write_json_atomic, write_text_atomic};
pub use loader::ChunkedLoader;
pub use records::RecordRepository;
pub use seed::sample_records;

use crate::config::paths::ReportPaths;
use crate::error::ReportError;

/// Main storage coordinator
pub struct Storage {
    paths: ReportPaths,
    pub records: RecordRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: ReportPaths) -> Result<Self, ReportError> {
        paths.ensure_directories()?;

        Ok(Self {
            records: RecordRepository::new(paths.records_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &ReportPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ReportError> {
        self.records.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ReportError> {
        self.records.save()
    }

    /// Check if a dataset has been written
    pub fn is_initialized(&self) -> bool {
        self.paths.records_file().exists()
    }
}

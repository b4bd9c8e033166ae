//! Chunked record loading
//!
//! Hands records out a fixed-size chunk at a time so an event loop can take
//! one chunk per tick instead of blocking on the whole dataset.

use crate::models::ProductionRecord;

/// Yields records in fixed-size chunks, in order
#[derive(Debug, Clone)]
pub struct ChunkedLoader {
    records: Vec<ProductionRecord>,
    cursor: usize,
    chunk_size: usize,
}

impl ChunkedLoader {
    /// Create a loader; a chunk size of zero is treated as one
    pub fn new(records: Vec<ProductionRecord>, chunk_size: usize) -> Self {
        Self {
            records,
            cursor: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn loaded(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.records.len()
    }

    /// Fraction loaded in [0.0, 1.0]; an empty dataset counts as fully loaded
    pub fn progress(&self) -> f64 {
        if self.records.is_empty() {
            1.0
        } else {
            self.cursor as f64 / self.records.len() as f64
        }
    }
}

impl Iterator for ChunkedLoader {
    type Item = Vec<ProductionRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        let end = (self.cursor + self.chunk_size).min(self.records.len());
        let chunk = self.records[self.cursor..end].to_vec();
        self.cursor = end;
        Some(chunk)
    }
}

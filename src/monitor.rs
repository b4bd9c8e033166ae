//! Per-session operation timing
//!
//! A `PerformanceMonitor` is created once in `main`, passed by `&mut` to the
//! command handlers and the dashboard, and consumed by [`PerformanceMonitor::finish`],
//! which logs a summary of every timed operation.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::{info, trace};

/// Aggregate timing for one named operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStats {
    pub count: u32,
    pub total: Duration,
    pub max: Duration,
}

impl OperationStats {
    fn add(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
        self.max = self.max.max(elapsed);
    }

    pub fn average(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total / self.count
        }
    }
}

/// Collects operation timings for one session
#[derive(Debug)]
pub struct PerformanceMonitor {
    started: Instant,
    operations: BTreeMap<&'static str, OperationStats>,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            operations: BTreeMap::new(),
        }
    }

    /// Run `f` and record how long it took under `name`
    pub fn measure<T, F: FnOnce() -> T>(&mut self, name: &'static str, f: F) -> T {
        let start = Instant::now();
        let result = f();
        self.record(name, start.elapsed());
        result
    }

    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        trace!(operation = name, elapsed_ms = elapsed.as_millis() as u64, "timed operation");
        self.operations.entry(name).or_default().add(elapsed);
    }

    pub fn stats(&self, name: &str) -> Option<OperationStats> {
        self.operations.get(name).copied()
    }

    /// Operations in name order
    pub fn summary(&self) -> Vec<(&'static str, OperationStats)> {
        self.operations.iter().map(|(k, v)| (*k, *v)).collect()
    }

    /// End the session and log one line per operation
    pub fn finish(self) -> Vec<(&'static str, OperationStats)> {
        let session = self.started.elapsed();
        let summary = self.summary();

        for (name, stats) in &summary {
            info!(
                operation = *name,
                count = stats.count,
                avg_ms = stats.average().as_millis() as u64,
                max_ms = stats.max.as_millis() as u64,
                "performance summary"
            );
        }
        info!(session_ms = session.as_millis() as u64, operations = summary.len(), "session finished");

        summary
    }
}

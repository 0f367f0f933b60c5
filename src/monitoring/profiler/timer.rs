use super::PerformanceProfiler;
use std::time::{Duration, Instant};

/// Records the time between creation and drop into the profiler
#[derive(Debug)]
#[must_use = "the timer records when dropped"]
pub struct OperationTimer<'a> {
    profiler: &'a PerformanceProfiler,
    name: String,
    start: Instant,
}

impl<'a> OperationTimer<'a> {
    pub(super) fn new(profiler: &'a PerformanceProfiler, name: &str) -> Self {
        Self {
            profiler,
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for OperationTimer<'_> {
    fn drop(&mut self) {
        self.profiler.record_operation(&self.name, self.start.elapsed());
    }
}

use std::fmt;
use std::time::Duration;

use super::driver::NodeOutcome;

/// Aggregate result of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub total: usize,
    pub migrated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl MigrationReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &NodeOutcome) {
        match outcome {
            NodeOutcome::Migrated => self.migrated += 1,
            NodeOutcome::Skipped => self.skipped += 1,
            NodeOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Nodes that reached a successful end state, skips included
    pub fn succeeded(&self) -> usize {
        self.migrated + self.skipped
    }

    pub fn summary(&self) -> String {
        format!(
            "Migration finished, count: {}/{}, elapsed time: {:.2}s.",
            self.succeeded(),
            self.total,
            self.elapsed.as_secs_f64()
        )
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

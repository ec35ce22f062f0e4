//! Best-effort click counting.

use crate::domain::background_task::{BackgroundTask, TaskQueue};

/// Defers click counter increments to the background worker.
///
/// Counts are at-most-once: an increment that is dropped from a full queue,
/// or that fails in the worker, is never replayed. Under-counting is
/// possible; over-counting is not.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    queue: TaskQueue,
}

impl ClickTracker {
    pub fn new(queue: TaskQueue) -> Self {
        Self { queue }
    }

    /// Schedules one click for `alias`. Returns `false` if it was dropped.
    pub fn increment(&self, alias: &str) -> bool {
        self.queue.schedule(BackgroundTask::IncrementClicks {
            alias: alias.to_string(),
        })
    }
}

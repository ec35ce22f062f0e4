//! Background task model and the bounded queue that carries it.

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use crate::domain::entities::NewUrlRecord;

/// A side effect deferred until after the HTTP response.
///
/// Tasks are executed by [`crate::domain::task_worker::run_task_worker`].
/// Delivery is at-most-once: a task that is dropped because the queue is
/// full, or that is still queued when the process dies, is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundTask {
    /// Insert a newly allocated alias, then populate the cache on success.
    PersistUrl {
        record: NewUrlRecord,
        cache_ttl: Option<Duration>,
    },

    /// Repopulate the cache after a miss served from the durable store.
    CacheUrl {
        alias: String,
        original_url: String,
        ttl: Option<Duration>,
    },

    /// Bump the click counter of an alias.
    IncrementClicks { alias: String },
}

impl BackgroundTask {
    /// Short label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BackgroundTask::PersistUrl { .. } => "persist_url",
            BackgroundTask::CacheUrl { .. } => "cache_url",
            BackgroundTask::IncrementClicks { .. } => "increment_clicks",
        }
    }

    /// Alias the task acts on.
    pub fn alias(&self) -> &str {
        match self {
            BackgroundTask::PersistUrl { record, .. } => &record.alias,
            BackgroundTask::CacheUrl { alias, .. } => alias,
            BackgroundTask::IncrementClicks { alias } => alias,
        }
    }
}

/// Producer handle of the background task queue.
///
/// Cloned into every service that defers work. [`TaskQueue::schedule`] never
/// waits: when the queue is full or the worker is gone the task is dropped,
/// logged and counted, and the caller is told so.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    sender: mpsc::Sender<BackgroundTask>,
}

impl TaskQueue {
    /// Creates a queue holding at most `capacity` pending tasks.
    ///
    /// The receiver is handed to the worker.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<BackgroundTask>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Enqueues a task without blocking.
    ///
    /// Returns `false` if the task was dropped.
    pub fn schedule(&self, task: BackgroundTask) -> bool {
        match self.sender.try_send(task) {
            Ok(()) => true,
            Err(TrySendError::Full(task)) => {
                warn!(
                    task = task.kind(),
                    alias = task.alias(),
                    "Background queue full, dropping task"
                );
                metrics::counter!("background_tasks_dropped_total", "reason" => "full")
                    .increment(1);
                false
            }
            Err(TrySendError::Closed(task)) => {
                warn!(
                    task = task.kind(),
                    alias = task.alias(),
                    "Background queue closed, dropping task"
                );
                metrics::counter!("background_tasks_dropped_total", "reason" => "closed")
                    .increment(1);
                false
            }
        }
    }

    /// Number of tasks waiting to be picked up by the worker.
    pub fn depth(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    /// Maximum number of pending tasks.
    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// Returns true once the worker has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

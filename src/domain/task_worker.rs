//! Background worker draining the task queue.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info, warn};

use crate::domain::background_task::BackgroundTask;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Retries of a durable insert after the first attempt fails with a storage error.
const PERSIST_RETRIES: usize = 3;

/// How a single task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    /// The task had nothing to act on (e.g. a click for an unknown alias).
    Skipped,
    Failed,
}

/// Runs the background worker until every [`crate::domain::background_task::TaskQueue`]
/// handle is dropped.
///
/// At most `concurrency` tasks run at once. Once the channel closes the
/// worker finishes the tasks already accepted and returns; tasks still in
/// the channel at that point are drained first.
pub async fn run_task_worker(
    mut rx: mpsc::Receiver<BackgroundTask>,
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    concurrency: usize,
) {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut in_flight = JoinSet::new();

    while let Some(task) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        let cache = cache.clone();
        in_flight.spawn(async move {
            let _permit = permit;
            execute_task(task, repository.as_ref(), cache.as_ref()).await
        });

        while let Some(joined) = in_flight.try_join_next() {
            log_join(joined);
        }
    }

    while let Some(joined) = in_flight.join_next().await {
        log_join(joined);
    }

    info!("Task worker stopped");
}

fn log_join(joined: Result<TaskOutcome, tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!("Background task panicked: {}", e);
    }
}

/// Executes one task. Failures are logged and swallowed.
pub async fn execute_task(
    task: BackgroundTask,
    repository: &dyn UrlRepository,
    cache: &dyn CacheService,
) -> TaskOutcome {
    let kind = task.kind();

    let outcome = match task {
        BackgroundTask::PersistUrl { record, cache_ttl } => {
            let strategy = ExponentialBackoff::from_millis(10)
                .factor(5)
                .max_delay(Duration::from_secs(2))
                .map(jitter)
                .take(PERSIST_RETRIES);

            let inserted = RetryIf::start(
                strategy,
                || repository.insert(record.clone()),
                |e: &AppError| {
                    let retry = e.is_transient();
                    if retry {
                        warn!(alias = %record.alias, "Insert failed, retrying: {}", e);
                    }
                    retry
                },
            )
            .await;

            match inserted {
                Ok(stored) => {
                    debug!(alias = %stored.alias, id = stored.id, "Persisted URL record");
                    if let Err(e) = cache
                        .set_url(&stored.alias, &stored.original_url, cache_ttl)
                        .await
                    {
                        warn!(alias = %stored.alias, "Failed to cache new URL: {}", e);
                    }
                    TaskOutcome::Completed
                }
                Err(e @ AppError::AliasConflict { .. }) => {
                    error!(
                        alias = %record.alias,
                        "Alias taken by a concurrent creator, mapping to {} lost: {}",
                        record.original_url,
                        e
                    );
                    TaskOutcome::Failed
                }
                Err(e) => {
                    error!(alias = %record.alias, "Failed to persist URL record: {}", e);
                    TaskOutcome::Failed
                }
            }
        }

        BackgroundTask::CacheUrl {
            alias,
            original_url,
            ttl,
        } => match cache.set_url(&alias, &original_url, ttl).await {
            Ok(()) => TaskOutcome::Completed,
            Err(e) => {
                warn!(alias = %alias, "Failed to repopulate cache: {}", e);
                TaskOutcome::Failed
            }
        },

        BackgroundTask::IncrementClicks { alias } => {
            match repository.increment_clicks(&alias).await {
                Ok(Some(_)) => TaskOutcome::Completed,
                Ok(None) => {
                    debug!(alias = %alias, "Click for unknown alias ignored");
                    TaskOutcome::Skipped
                }
                Err(e) => {
                    error!(alias = %alias, "Failed to increment clicks: {}", e);
                    TaskOutcome::Failed
                }
            }
        }
    };

    let label = match outcome {
        TaskOutcome::Completed => "completed",
        TaskOutcome::Skipped => "skipped",
        TaskOutcome::Failed => "failed",
    };
    metrics::counter!("background_tasks_total", "task" => kind, "outcome" => label).increment(1);

    outcome
}

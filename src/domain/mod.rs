//! Domain layer containing business entities and background work.
//!
//! This module has no dependency on HTTP. It defines the URL record, the
//! contract of the durable store, and the in-process task queue used to run
//! side effects after a response has been sent.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`background_task`] - Deferred side effects and the bounded queue carrying them
//! - [`task_worker`] - Worker draining the queue
//!
//! # Background Flow
//!
//! 1. A service allocates an alias or resolves one
//! 2. A [`background_task::BackgroundTask`] is scheduled on the [`background_task::TaskQueue`]
//! 3. [`task_worker::run_task_worker`] persists, caches or counts
//! 4. Failures are logged and the task is discarded

pub mod background_task;
pub mod entities;
pub mod repositories;
pub mod task_worker;

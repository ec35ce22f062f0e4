//! Application layer services implementing business logic.
//!
//! Services consume the repository and cache traits and give HTTP handlers a
//! small API. None of them waits for a side effect: persistence after
//! creation, cache repopulation and click counting are handed to the
//! background queue.
//!
//! # Available Services
//!
//! - [`services::creation_service::CreationService`] - Alias allocation and deferred persistence
//! - [`services::resolution_service::ResolutionService`] - Cache-aside alias lookup
//! - [`services::click_tracker::ClickTracker`] - Best-effort click counting
//! - [`services::health_service::HealthService`] - Store, cache and queue probes
//! - [`services::auth_service::AuthService`] - Static bearer token check

pub mod services;

//! Business logic services for the application layer.

pub mod auth_service;
pub mod click_tracker;
pub mod creation_service;
pub mod health_service;
pub mod resolution_service;

pub use auth_service::AuthService;
pub use click_tracker::ClickTracker;
pub use creation_service::{CreatedAlias, CreationService};
pub use health_service::{HealthService, QueueStatus};
pub use resolution_service::{Resolution, ResolutionService, ResolutionSource};

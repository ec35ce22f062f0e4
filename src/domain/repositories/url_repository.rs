//! Repository trait for durable URL record access.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the authoritative alias → URL store.
///
/// The store owns persistence and alias uniqueness. Implementations must
/// enforce uniqueness themselves (a unique index, not a lookup) so that two
/// racing inserts of the same alias cannot both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and returns it with its store-assigned fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AliasConflict`] if the alias is already taken.
    /// Returns [`AppError::Storage`] on any other database error.
    async fn insert(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its alias.
    ///
    /// Aliases are case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Atomically increments the click counter of an alias.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(count))` with the counter value after the increment
    /// - `Ok(None)` if no record bears the alias (nothing is changed)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn increment_clicks(&self, alias: &str) -> Result<Option<i64>, AppError>;

    /// Returns the highest assigned record id, or `None` for an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn last_id(&self) -> Result<Option<i64>, AppError>;
}

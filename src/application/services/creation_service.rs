//! Alias allocation for new short URLs.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::info;

use crate::domain::background_task::{BackgroundTask, TaskQueue};
use crate::domain::entities::{MAX_DESCRIPTION_LEN, NewUrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::alias_generator::{
    GENERATED_ALIAS_LENGTH, generate_alias, validate_preferred_alias,
};
use crate::utils::url_normalizer::normalize_url;

/// A freshly allocated alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAlias {
    pub alias: String,
    pub original_url: String,
    pub short_url: String,
}

/// Service allocating aliases and deferring their persistence.
///
/// # Write Path
///
/// The response is returned as soon as the alias is validated and allocated.
/// The durable insert and the cache population run later on the background
/// worker, in that order. The short URL is therefore handed out before it is
/// guaranteed to be persisted; a crash in between loses the mapping.
///
/// # Uniqueness
///
/// The alias, preferred or generated, is checked against the store first so
/// that the common case fails fast with a conflict. The check is not atomic with the insert:
/// the store's unique index is what actually guarantees that at most one
/// record bears a given alias.
pub struct CreationService {
    repository: Arc<dyn UrlRepository>,
    queue: TaskQueue,
    base_url: String,
    cache_ttl: Duration,
}

impl CreationService {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        queue: TaskQueue,
        base_url: String,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            queue,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache_ttl,
        }
    }

    /// Allocates an alias for `original_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL, an invalid
    /// preferred alias or an oversized description.
    /// Returns [`AppError::AliasConflict`] if the alias is taken.
    /// Returns [`AppError::Storage`] if the conflict pre-check cannot reach the store.
    /// Returns [`AppError::Internal`] if the background queue cannot accept the write.
    pub async fn create(
        &self,
        original_url: &str,
        preferred_alias: Option<String>,
        description: Option<String>,
    ) -> Result<CreatedAlias, AppError> {
        let original_url = normalize_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(description) = &description {
            let len = description.chars().count();
            if len > MAX_DESCRIPTION_LEN {
                return Err(AppError::bad_request(
                    format!("Description must be at most {} characters", MAX_DESCRIPTION_LEN),
                    json!({ "provided_length": len }),
                ));
            }
        }

        let alias = match preferred_alias {
            Some(alias) => {
                validate_preferred_alias(&alias)?;
                alias
            }
            None => generate_alias(GENERATED_ALIAS_LENGTH),
        };

        if self.repository.find_by_alias(&alias).await?.is_some() {
            return Err(AppError::alias_conflict(alias));
        }

        let record = NewUrlRecord {
            alias: alias.clone(),
            original_url: original_url.clone(),
            description,
        };

        let scheduled = self.queue.schedule(BackgroundTask::PersistUrl {
            record,
            cache_ttl: Some(self.cache_ttl),
        });
        if !scheduled {
            return Err(AppError::internal(
                "Creation queue is full, retry later",
                json!({ "queue_capacity": self.queue.max_capacity() }),
            ));
        }

        info!(alias = %alias, "Allocated alias");

        Ok(CreatedAlias {
            short_url: self.short_url(&alias),
            alias,
            original_url,
        })
    }

    /// Builds the public short URL of an alias.
    pub fn short_url(&self, alias: &str) -> String {
        format!("{}/{}", self.base_url, alias)
    }
}

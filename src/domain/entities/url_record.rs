//! URL record entity representing an alias → URL mapping.

use chrono::{DateTime, Utc};

/// Maximum length of the free-text description attached to a record.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// The authoritative mapping from a short alias to its original URL.
///
/// Records are created exactly once and never deleted; the only mutation
/// they ever see is the click counter going up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: i64,
    pub alias: String,
    pub original_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_clicks: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        alias: String,
        original_url: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        total_clicks: i64,
    ) -> Self {
        Self {
            id,
            alias,
            original_url,
            description,
            created_at,
            total_clicks,
        }
    }
}

/// Input data for inserting a new record.
///
/// `id`, `created_at` and `total_clicks` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub alias: String,
    pub original_url: String,
    pub description: Option<String>,
}

//! DTOs for the alias creation endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for preferred alias validation.
static PREFERRED_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct MinifyRequest {
    /// The original URL (must be an absolute URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional caller-chosen alias.
    #[validate(length(min = 5, max = 20))]
    #[validate(regex(path = "*PREFERRED_ALIAS_REGEX"))]
    pub preferred_alias: Option<String>,

    #[validate(length(max = 255))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MinifyResponse {
    pub minified_url: String,
}

//! Alias generation and validation.
//!
//! Generated aliases are drawn uniformly from the 62 ASCII alphanumerics using
//! the thread-local CSPRNG. Nothing here guarantees uniqueness; the durable
//! store's unique index does.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde_json::json;

/// Length used when the caller asks for less than [`MIN_ALIAS_LENGTH`].
pub const DEFAULT_ALIAS_LENGTH: usize = 8;

/// Shortest alias the generator will produce.
pub const MIN_ALIAS_LENGTH: usize = 4;

/// Length of aliases synthesized on creation when none is preferred.
pub const GENERATED_ALIAS_LENGTH: usize = 6;

/// Longest caller-chosen alias.
pub const PREFERRED_ALIAS_MAX: usize = 20;

/// Shortest caller-chosen alias accepted by the HTTP API. The service itself
/// only requires a non-empty alias.
pub const PREFERRED_ALIAS_MIN: usize = 5;

/// Aliases that would be shadowed by fixed routes.
const RESERVED_ALIASES: &[&str] = &["api", "health", "minify"];

/// Generates a random alphanumeric alias of `length` characters.
///
/// Lengths below [`MIN_ALIAS_LENGTH`] silently fall back to
/// [`DEFAULT_ALIAS_LENGTH`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(generate_alias(6).len(), 6);
/// assert_eq!(generate_alias(2).len(), 8);
/// ```
pub fn generate_alias(length: usize) -> String {
    let length = if length < MIN_ALIAS_LENGTH {
        DEFAULT_ALIAS_LENGTH
    } else {
        length
    };

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a caller-chosen alias.
///
/// # Rules
///
/// - Length: 1-20 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_` (case-sensitive)
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_preferred_alias(alias: &str) -> Result<(), AppError> {
    let len = alias.chars().count();
    if len == 0 || len > PREFERRED_ALIAS_MAX {
        return Err(AppError::bad_request(
            format!("Preferred alias must be 1-{} characters", PREFERRED_ALIAS_MAX),
            json!({ "provided_length": len }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Preferred alias can only contain letters, digits, hyphens and underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

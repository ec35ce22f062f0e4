//! URL validation and normalization.
//!
//! Stored URLs are kept verbatim apart from surrounding whitespace and
//! trailing slashes, which are stripped so that `https://example.com/` and
//! `https://example.com` map to the same target.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain whitespace or control characters")]
    IllegalCharacter,
}

/// Strips surrounding whitespace and trailing slashes.
///
/// Trailing whitespace and slashes are removed together, so the result is a
/// fixed point: `normalize(normalize(u)) == normalize(u)` for every input.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize("  https://example.com/ "), "https://example.com");
/// assert_eq!(normalize("https://example.com/a//"), "https://example.com/a");
/// ```
pub fn normalize(input: &str) -> String {
    input
        .trim_start()
        .trim_end_matches(|c: char| c == '/' || c.is_whitespace())
        .to_string()
}

/// Normalizes a URL and checks that it is an absolute HTTP(S) URL.
///
/// The returned string is the [`normalize`]d input, not the parser's
/// re-serialization: host case, ports and fragments are preserved.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] if nothing is left after trimming.
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlNormalizationError::MissingHost`] if the URL has no host.
/// Returns [`UrlNormalizationError::IllegalCharacter`] for inner whitespace or
/// control characters; the result must be usable as a `Location` header.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    if normalized
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlNormalizationError::IllegalCharacter);
    }

    let url =
        Url::parse(&normalized).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::MissingHost);
    }

    Ok(normalized)
}

//! Authentication service for the protected health probes.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Checks bearer tokens against a single configured API token.
///
/// The configured token is never compared directly. Both sides are MACed
/// with HMAC-SHA256 under a key drawn at startup, and the tags are compared
/// in constant time. Without a configured token every request is rejected.
pub struct AuthService {
    key: [u8; 32],
    expected_tag: Option<Vec<u8>>,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// An empty `api_token` is treated as unset.
    pub fn new(api_token: Option<String>) -> Self {
        let key: [u8; 32] = rand::random();
        let expected_tag = api_token
            .filter(|token| !token.is_empty())
            .map(|token| Self::mac(&key, &token).finalize().into_bytes().to_vec());

        Self { key, expected_tag }
    }

    fn mac(key: &[u8; 32], token: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        mac
    }

    /// Whether a token is configured at all.
    pub fn is_enabled(&self) -> bool {
        self.expected_tag.is_some()
    }

    /// Authenticates a raw bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if no token is configured or the
    /// token does not match.
    pub fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let Some(expected) = &self.expected_tag else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "API token is not configured" }),
            ));
        };

        Self::mac(&self.key, token)
            .verify_slice(expected)
            .map_err(|_| {
                AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid token" }))
            })
    }
}

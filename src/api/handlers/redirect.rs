//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Resolve the alias through the cache, then the durable store
/// 2. Background worker repopulates the cache (store hits only)
/// 3. Background worker increments the click counter
/// 4. Return 301 Moved Permanently
///
/// # Errors
///
/// Returns 404 Not Found if the alias doesn't exist.
/// Returns 500 if the stored URL cannot be sent as a `Location` header.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let resolution = state.resolution_service.resolve(&alias).await?;

    let location = HeaderValue::try_from(resolution.original_url).map_err(|e| {
        tracing::error!(alias = %alias, "Stored URL is not a valid Location: {}", e);
        AppError::internal("Stored URL cannot be redirected to", json!({ "alias": alias }))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]))
}

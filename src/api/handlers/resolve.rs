//! Handler for the API form of alias resolution.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::resolve::ResolveResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the original URL of an alias.
///
/// # Endpoint
///
/// `GET /api/v1.0/{alias}`
///
/// # Response
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found with `{"detail": "Requested url not found"}` for an
/// unknown alias.
pub async fn resolve_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ResolveResponse>, AppError> {
    let resolution = state.resolution_service.resolve(&alias).await?;

    Ok(Json(ResolveResponse {
        url: resolution.original_url,
    }))
}

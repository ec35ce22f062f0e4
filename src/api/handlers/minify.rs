//! Handler for the alias creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::minify::{MinifyRequest, MinifyResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Allocates an alias for a URL.
///
/// # Endpoint
///
/// `POST /api/v1.0/minify`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/",
///   "preferred_alias": "exmpl1",   // optional, 5-20 chars
///   "description": "landing page"  // optional, up to 255 chars
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "minified_url": "http://localhost:8000/exmpl1" }
/// ```
///
/// The mapping is persisted in the background; the alias may take a moment
/// to become resolvable.
///
/// # Errors
///
/// Returns 422 Unprocessable Entity if the body is malformed or invalid.
/// Returns 409 Conflict if the preferred alias is taken.
pub async fn minify_handler(
    State(state): State<AppState>,
    payload: Result<Json<MinifyRequest>, JsonRejection>,
) -> Result<Json<MinifyResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state
        .creation_service
        .create(&payload.url, payload.preferred_alias, payload.description)
        .await?;

    Ok(Json(MinifyResponse {
        minified_url: created.short_url,
    }))
}

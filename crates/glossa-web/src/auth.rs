//! Admin guard for the management API.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use glossa_common::ApiError;

use crate::state::SharedState;

/// Let the request through only with `Authorization: Bearer <admin token>`.
pub async fn require_admin(
    State(state): State<SharedState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = headers.typed_get::<Authorization<Bearer>>();

    match presented {
        Some(auth) if state.config.admin.accepts(auth.token()) => {
            Ok(next.run(request).await)
        }
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "rejected admin request with invalid token");
            Err(ApiError::Forbidden)
        }
        None => {
            tracing::debug!(path = %request.uri().path(), "rejected anonymous admin request");
            Err(ApiError::Forbidden)
        }
    }
}

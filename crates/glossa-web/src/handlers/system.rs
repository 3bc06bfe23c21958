//! Liveness and row counts.

use axum::{extract::State, response::IntoResponse, Json};
use glossa_common::ApiError;
use serde_json::json;

use crate::state::SharedState;

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.db.stats().await?;
    Ok(Json(json!({
        "status": "ok",
        "stats": stats,
    })))
}

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

pub async fn heartbeat() -> impl IntoResponse {
    Json(json!({ "success": true }))
}

/// Read-only echo of the effective settings.
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.settings.clone())
}

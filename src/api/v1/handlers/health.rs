/*
 * Responsibility
 * - GET /health (liveness)
 * - reports which row source backs the post service; never touches it
 */
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "ok", "source": state.posts.backend_name()})),
    )
}

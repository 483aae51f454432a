//! # routes::system

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::state::SharedState;

// ─── GET /api/health ──────────────────────────────────────────────────────────

pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    Json(json!({
        "success":     true,
        "coins":       state.coins.list().len(),
        "environment": state.config.environment.to_string(),
    }))
}

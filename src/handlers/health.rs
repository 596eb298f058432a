use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::state::AppState;

// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "time": Utc::now(),
        "has_secret": !state.config.admin_secret.is_empty(),
    }))
}

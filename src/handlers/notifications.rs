use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use super::check_admin;
use crate::config::NOTIFICATIONS_PAGE_SIZE;
use crate::errors::AppError;
use crate::services::notify;
use crate::state::AppState;

// GET /api/notifications
pub async fn recent_notifications(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<String>>, AppError> {
    check_admin(&headers, &state.config)?;

    let lines = {
        let store = state.store.lock().unwrap();
        notify::recent(&store, NOTIFICATIONS_PAGE_SIZE)?
    };
    Ok(Json(lines))
}

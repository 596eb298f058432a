use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use super::check_admin;
use crate::errors::AppError;
use crate::models::{NewService, ServiceItem, ServiceUpdate};
use crate::state::AppState;
use crate::store::content;

// GET /api/services
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ServiceItem>>, AppError> {
    let services = {
        let store = state.store.lock().unwrap();
        content::list_services(&store)?
    };
    Ok(Json(services))
}

// POST /api/services
pub async fn add_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(new): Json<NewService>,
) -> Result<(StatusCode, Json<ServiceItem>), AppError> {
    check_admin(&headers, &state.config)?;

    let service = {
        let store = state.store.lock().unwrap();
        content::add_service(&store, new)?
    };
    Ok((StatusCode::CREATED, Json(service)))
}

// PUT /api/services/:id
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<ServiceUpdate>,
) -> Result<Json<ServiceItem>, AppError> {
    check_admin(&headers, &state.config)?;

    let service = {
        let store = state.store.lock().unwrap();
        content::update_service(&store, &id, update)?
    };
    Ok(Json(service))
}

// DELETE /api/services/:id
pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&headers, &state.config)?;

    {
        let store = state.store.lock().unwrap();
        content::delete_service(&store, &id)?;
    }
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use super::check_admin;
use crate::errors::AppError;
use crate::models::{GalleryItem, GalleryUpdate, NewGalleryItem};
use crate::state::AppState;
use crate::store::content;

// GET /api/gallery
pub async fn list_gallery(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GalleryItem>>, AppError> {
    let gallery = {
        let store = state.store.lock().unwrap();
        content::list_gallery(&store)?
    };
    Ok(Json(gallery))
}

// POST /api/gallery
pub async fn add_gallery_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(new): Json<NewGalleryItem>,
) -> Result<(StatusCode, Json<GalleryItem>), AppError> {
    check_admin(&headers, &state.config)?;

    let item = {
        let store = state.store.lock().unwrap();
        content::add_gallery_item(&store, new)?
    };
    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/gallery/:id
pub async fn update_gallery_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(update): Json<GalleryUpdate>,
) -> Result<Json<GalleryItem>, AppError> {
    check_admin(&headers, &state.config)?;

    let item = {
        let store = state.store.lock().unwrap();
        content::update_gallery_item(&store, &id, update)?
    };
    Ok(Json(item))
}

// DELETE /api/gallery/:id
pub async fn delete_gallery_item(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&headers, &state.config)?;

    {
        let store = state.store.lock().unwrap();
        content::delete_gallery_item(&store, &id)?;
    }
    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use super::check_admin;
use crate::errors::AppError;
use crate::models::{NewTestimonial, Testimonial};
use crate::state::AppState;
use crate::store::content;

// GET /api/testimonials
pub async fn list_testimonials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = {
        let store = state.store.lock().unwrap();
        content::list_testimonials(&store)?
    };
    Ok(Json(testimonials))
}

// POST /api/testimonials
pub async fn add_testimonial(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    let entry = {
        let store = state.store.lock().unwrap();
        content::add_testimonial(&store, new)?
    };
    Ok((StatusCode::CREATED, Json(entry)))
}

// DELETE /api/testimonials/:id
pub async fn delete_testimonial(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&headers, &state.config)?;

    {
        let store = state.store.lock().unwrap();
        content::delete_testimonial(&store, &id)?;
    }
    Ok(Json(serde_json::json!({ "message": "Deleted successfully" })))
}

pub mod bookings;
pub mod gallery;
pub mod health;
pub mod notifications;
pub mod services;
pub mod testimonials;

use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Json;

use crate::config::AppConfig;
use crate::errors::AppError;

pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Admin-gated routes require the shared secret header to match the
/// configured value.
pub(crate) fn check_admin(headers: &HeaderMap, config: &AppConfig) -> Result<(), AppError> {
    let secret = headers
        .get(ADMIN_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if secret != config.admin_secret {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// JSON 404 for unmatched /api paths; everything else falls through to the
/// static file service.
pub async fn api_not_found(method: Method, uri: Uri) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": format!("API endpoint {method} {uri} not found")
        })),
    )
}

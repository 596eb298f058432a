use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;

use super::check_admin;
use crate::errors::AppError;
use crate::models::{Booking, NewBooking};
use crate::services::notify;
use crate::state::AppState;
use crate::store::bookings;

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(candidate): Json<NewBooking>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let booking = {
        let store = state.store.lock().unwrap();
        bookings::create_booking(&store, candidate)?
    };

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Booking successful",
            "id": booking.id,
        })),
    ))
}

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_admin(&headers, &state.config)?;

    let bookings = {
        let store = state.store.lock().unwrap();
        bookings::list_bookings(&store)?
    };
    Ok(Json(bookings))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_admin(&headers, &state.config)?;

    let removed = {
        let store = state.store.lock().unwrap();
        bookings::delete_booking(&store, &id)?
    };
    if !removed {
        tracing::debug!(booking_id = %id, "delete for unknown booking id");
    }

    Ok(Json(serde_json::json!({ "message": "Deleted successfully" })))
}

// PATCH /api/bookings/:id/confirm
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    check_admin(&headers, &state.config)?;

    let booking = {
        let store = state.store.lock().unwrap();
        bookings::confirm_booking(&store, &id)?
    };

    // Fire-and-forget: the confirmation response never waits on delivery.
    let task_state = Arc::clone(&state);
    let record = booking.clone();
    tokio::spawn(async move {
        match task_state.mailer.send_confirmation(&record).await {
            Ok(()) => {
                let store = task_state.store.lock().unwrap();
                notify::append(
                    &store,
                    &format!("Confirmation email sent to {}", record.email),
                );
            }
            Err(e) => {
                tracing::error!(error = %e, booking_id = %record.id, "confirmation email failed");
            }
        }
    });

    Ok(Json(booking))
}

// GET /api/stats/bookings
pub async fn booking_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BTreeMap<String, u32>>, AppError> {
    check_admin(&headers, &state.config)?;

    let stats = {
        let store = state.store.lock().unwrap();
        bookings::booking_stats(&store, Utc::now().date_naive())?
    };
    Ok(Json(stats))
}

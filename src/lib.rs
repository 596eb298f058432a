pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::routing::{delete, get, patch, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router. Shared with the integration tests so
/// they exercise the same routing table as the binary.
pub fn app(state: Arc<AppState>) -> Router {
    let public_dir = state.config.public_dir.clone();

    let api = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route("/bookings/:id", delete(handlers::bookings::delete_booking))
        .route(
            "/bookings/:id/confirm",
            patch(handlers::bookings::confirm_booking),
        )
        .route("/stats/bookings", get(handlers::bookings::booking_stats))
        .route(
            "/notifications",
            get(handlers::notifications::recent_notifications),
        )
        .route(
            "/testimonials",
            get(handlers::testimonials::list_testimonials)
                .post(handlers::testimonials::add_testimonial),
        )
        .route(
            "/testimonials/:id",
            delete(handlers::testimonials::delete_testimonial),
        )
        .route(
            "/services",
            get(handlers::services::list_services).post(handlers::services::add_service),
        )
        .route(
            "/services/:id",
            put(handlers::services::update_service).delete(handlers::services::delete_service),
        )
        .route(
            "/gallery",
            get(handlers::gallery::list_gallery).post(handlers::gallery::add_gallery_item),
        )
        .route(
            "/gallery/:id",
            put(handlers::gallery::update_gallery_item)
                .delete(handlers::gallery::delete_gallery_item),
        )
        .fallback(handlers::api_not_found);

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::services::notify;
use crate::state::AppState;
use crate::store::bookings;

/// Background task that prunes expired bookings: one run shortly after
/// startup, then on a fixed interval.
pub async fn run_sweeper(state: Arc<AppState>) {
    tokio::time::sleep(state.config.sweep_startup_delay).await;

    let mut interval = tokio::time::interval(state.config.sweep_interval);
    loop {
        interval.tick().await;
        sweep_once(&state);
    }
}

/// A single retention pass. Errors are logged no-ops; the next scheduled
/// run self-heals.
pub fn sweep_once(state: &AppState) {
    let cutoff = Utc::now().naive_utc() - Duration::hours(state.config.retention_hours);

    let store = state.store.lock().unwrap();
    match bookings::prune_expired(&store, cutoff) {
        Ok(0) => {}
        Ok(removed) => {
            notify::append(&store, &format!("Cleaned up {removed} expired bookings."));
        }
        Err(e) => tracing::warn!(error = %e, "booking cleanup skipped"),
    }
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use barberbook::config::AppConfig;
use barberbook::models::Booking;
use barberbook::services::email::Mailer;
use barberbook::services::{notify, sweeper};
use barberbook::state::AppState;
use barberbook::store::Storage;

// ── Mock Mailer ──

struct MockMailer {
    sent: Arc<Mutex<Vec<Booking>>>,
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_confirmation(&self, booking: &Booking) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(booking.clone());
        Ok(())
    }
}

// ── Helpers ──

fn test_config(data_dir: &std::path::Path) -> AppConfig {
    let dir = data_dir.to_string_lossy().into_owned();
    AppConfig {
        port: 3000,
        data_dir: dir.clone(),
        public_dir: dir,
        admin_secret: "test-secret".to_string(),
        business_name: "Test Barber".to_string(),
        smtp_host: "localhost".to_string(),
        smtp_port: 587,
        smtp_user: String::new(),
        smtp_pass: String::new(),
        email_from: "no-reply@test.local".to_string(),
        retention_hours: 24,
        sweep_interval: Duration::from_secs(3600),
        sweep_startup_delay: Duration::from_secs(0),
    }
}

fn test_state() -> (TempDir, Arc<AppState>) {
    let (dir, state, _) = test_state_with_sent();
    (dir, state)
}

fn test_state_with_sent() -> (TempDir, Arc<AppState>, Arc<Mutex<Vec<Booking>>>) {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path());
    let storage = Storage::open(dir.path()).unwrap();
    let sent = Arc::new(Mutex::new(vec![]));
    let state = Arc::new(AppState {
        store: Arc::new(Mutex::new(storage)),
        config,
        mailer: Box::new(MockMailer {
            sent: Arc::clone(&sent),
        }),
    });
    (dir, state, sent)
}

fn test_app(state: Arc<AppState>) -> Router {
    barberbook::app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn admin_get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-admin-secret", "test-secret")
        .body(Body::empty())
        .unwrap()
}

fn admin_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-admin-secret", "test-secret")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn public_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    assert_eq!(json["status"], "ok");
}

// ── Admin Auth ──

#[tokio::test]
async fn test_admin_requires_secret_header() {
    let (_dir, state) = test_state();

    for uri in [
        "/api/bookings",
        "/api/stats/bookings",
        "/api/notifications",
    ] {
        let app = test_app(state.clone());
        let res = app.oneshot(get(uri)).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "uri: {uri}");
    }
}

#[tokio::test]
async fn test_admin_wrong_secret() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/bookings")
                .header("x-admin-secret", "wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// ── Bookings ──

#[tokio::test]
async fn test_create_booking_and_slot_conflict() {
    let (_dir, state) = test_state();

    // Alice books a slot.
    let app = test_app(state.clone());
    let res = app
        .oneshot(public_post(
            "/api/bookings",
            r#"{"name":"Alice","date":"2024-06-01","time":"10:00","service":"Cut"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let json = body_json(res).await;
    assert_eq!(json["message"], "Booking successful");
    assert!(json["id"].as_str().is_some_and(|id| !id.is_empty()));

    // Bob asks for the identical slot.
    let app = test_app(state.clone());
    let res = app
        .oneshot(public_post(
            "/api/bookings",
            r#"{"name":"Bob","date":"2024-06-01","time":"10:00","service":"Shave"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let json = body_json(res).await;
    assert_eq!(
        json["error"],
        "This time slot is already booked. Please choose another time."
    );

    // Only Alice's record exists.
    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/bookings")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Alice");
    assert_eq!(list[0]["status"], "pending");
}

#[tokio::test]
async fn test_create_booking_missing_fields() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(public_post(
            "/api/bookings",
            r#"{"name":"Alice","date":"2024-06-01"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_booking_is_idempotent() {
    let (_dir, state) = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(public_post(
            "/api/bookings",
            r#"{"name":"Alice","date":"2024-06-01","time":"10:00"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(res).await["id"].as_str().unwrap().to_string();

    // Delete the record, then delete it again; both answer 200.
    for _ in 0..2 {
        let app = test_app(state.clone());
        let res = app
            .oneshot(admin_request(
                "DELETE",
                &format!("/api/bookings/{id}"),
                "",
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/bookings")).await.unwrap();
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_confirm_unknown_booking_404() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(admin_request(
            "PATCH",
            "/api/bookings/no-such-id/confirm",
            "",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_confirm_sends_email_per_call() {
    let (_dir, state, sent) = test_state_with_sent();

    let app = test_app(state.clone());
    let res = app
        .oneshot(public_post(
            "/api/bookings",
            r#"{"name":"Alice","email":"alice@example.com","date":"2024-06-01","time":"10:00","service":"Cut"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(res).await["id"].as_str().unwrap().to_string();

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "PATCH",
            &format!("/api/bookings/{id}/confirm"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"], "confirmed");

    // Dispatch is detached; give the spawned task a beat.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sent.lock().unwrap().len(), 1);
    assert_eq!(sent.lock().unwrap()[0].email, "alice@example.com");

    // Confirming again succeeds and fires the side-effect once more.
    let app = test_app(state);
    let res = app
        .oneshot(admin_request(
            "PATCH",
            &format!("/api/bookings/{id}/confirm"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sent.lock().unwrap().len(), 2);
}

// ── Stats ──

#[tokio::test]
async fn test_stats_zero_filled_window() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app.oneshot(admin_get("/api/stats/bookings")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    let map = json.as_object().unwrap();
    assert_eq!(map.len(), 11);
    assert!(map.values().all(|v| v == 0));
}

#[tokio::test]
async fn test_stats_counts_todays_booking() {
    let (_dir, state) = test_state();
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();

    let app = test_app(state.clone());
    let res = app
        .oneshot(public_post(
            "/api/bookings",
            &format!(r#"{{"name":"Alice","date":"{today}","time":"10:00"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/stats/bookings")).await.unwrap();
    let json = body_json(res).await;
    assert_eq!(json[&today], 1);
}

// ── Notifications ──

#[tokio::test]
async fn test_booking_emits_notification_line() {
    let (_dir, state) = test_state();

    let app = test_app(state.clone());
    app.oneshot(public_post(
        "/api/bookings",
        r#"{"name":"Alice","date":"2024-06-01","time":"10:00","service":"Cut"}"#,
    ))
    .await
    .unwrap();

    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/notifications")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let json = body_json(res).await;
    let lines = json.as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0]
        .as_str()
        .unwrap()
        .contains("New booking received from Alice for Cut on 2024-06-01 at 10:00"));
}

#[tokio::test]
async fn test_notifications_capped_most_recent_first() {
    let (_dir, state) = test_state();

    {
        let store = state.store.lock().unwrap();
        for i in 0..20 {
            notify::append(&store, &format!("event {i}"));
        }
    }

    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/notifications")).await.unwrap();
    let json = body_json(res).await;
    let lines = json.as_array().unwrap();
    assert_eq!(lines.len(), 15);
    assert!(lines[0].as_str().unwrap().ends_with("event 19"));
    assert!(lines[14].as_str().unwrap().ends_with("event 5"));
}

// ── Retention Sweeper ──

#[tokio::test]
async fn test_sweeper_prunes_expired_and_logs_summary() {
    let (_dir, state) = test_state();

    let app = test_app(state.clone());
    app.oneshot(public_post(
        "/api/bookings",
        r#"{"name":"Old","date":"2020-01-01","time":"10:00"}"#,
    ))
    .await
    .unwrap();
    let future = (chrono::Utc::now().date_naive() + chrono::Duration::days(3))
        .format("%Y-%m-%d")
        .to_string();
    let app = test_app(state.clone());
    app.oneshot(public_post(
        "/api/bookings",
        &format!(r#"{{"name":"Future","date":"{future}","time":"10:00"}}"#),
    ))
    .await
    .unwrap();

    sweeper::sweep_once(&state);

    let app = test_app(state.clone());
    let res = app.oneshot(admin_get("/api/bookings")).await.unwrap();
    let json = body_json(res).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["name"], "Future");

    let app = test_app(state);
    let res = app.oneshot(admin_get("/api/notifications")).await.unwrap();
    let json = body_json(res).await;
    assert!(json.as_array().unwrap()[0]
        .as_str()
        .unwrap()
        .contains("Cleaned up 1 expired bookings."));
}

// ── Testimonials ──

#[tokio::test]
async fn test_testimonial_lifecycle() {
    let (_dir, state) = test_state();

    // Public POST.
    let app = test_app(state.clone());
    let res = app
        .oneshot(public_post(
            "/api/testimonials",
            r#"{"name":"Alice","story":"Best cut in town"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = body_json(res).await;
    assert_eq!(created["role"], "Client");

    // Public GET.
    let app = test_app(state.clone());
    let res = app.oneshot(get("/api/testimonials")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    // Delete is admin-gated.
    let id = created["id"].as_str().unwrap();
    let app = test_app(state.clone());
    let res = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/testimonials/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "DELETE",
            &format!("/api/testimonials/{id}"),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app.oneshot(get("/api/testimonials")).await.unwrap();
    let json = body_json(res).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_testimonial_requires_name_and_story() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(public_post("/api/testimonials", r#"{"name":"Alice"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ── Services ──

#[tokio::test]
async fn test_services_crud() {
    let (_dir, state) = test_state();

    // POST needs the admin secret.
    let app = test_app(state.clone());
    let res = app
        .oneshot(public_post(
            "/api/services",
            r#"{"name":"Cut","price":"25"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "POST",
            "/api/services",
            r#"{"name":"Cut","price":"25"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = body_json(res).await["id"].as_str().unwrap().to_string();

    // Public list.
    let app = test_app(state.clone());
    let res = app.oneshot(get("/api/services")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 1);

    // Partial update merges fields.
    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "PUT",
            &format!("/api/services/{id}"),
            r#"{"price":"30"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["name"], "Cut");
    assert_eq!(json["price"], "30");

    // Update on an unknown id.
    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "PUT",
            "/api/services/no-such-id",
            r#"{"price":"1"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let app = test_app(state);
    let res = app
        .oneshot(admin_request("DELETE", &format!("/api/services/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

// ── Gallery ──

#[tokio::test]
async fn test_gallery_requires_url() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app
        .oneshot(admin_request("POST", "/api/gallery", r#"{"caption":"x"}"#))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_gallery_crud() {
    let (_dir, state) = test_state();

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "POST",
            "/api/gallery",
            r#"{"url":"https://example.com/fade.jpg","caption":"Fade"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = body_json(res).await["id"].as_str().unwrap().to_string();

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request(
            "PUT",
            &format!("/api/gallery/{id}"),
            r#"{"caption":"Skin fade"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["caption"], "Skin fade");

    let app = test_app(state.clone());
    let res = app
        .oneshot(admin_request("DELETE", &format!("/api/gallery/{id}"), ""))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let app = test_app(state);
    let res = app.oneshot(get("/api/gallery")).await.unwrap();
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 0);
}

// ── API Fallback ──

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let (_dir, state) = test_state();
    let app = test_app(state);

    let res = app.oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let json = body_json(res).await;
    assert!(json["error"].as_str().unwrap().contains("not found"));
}

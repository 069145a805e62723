use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::router::appointment_routes;
use shared_config::{AppConfig, StoreBackend};
use shared_database::{AppState, InMemoryStore, SupabaseClient};
use shared_utils::test_utils::{TestConfig, TestFixtures};

async fn create_test_app() -> (Router, Arc<InMemoryStore>) {
    let (state, store) = TestConfig::default().to_state();
    TestFixtures::seed_doctor(store.as_ref(), "DOC-1").await;
    (appointment_routes(state), store)
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn booking_body(time: &str) -> Value {
    json!({
        "patient_id": "PID-100200",
        "doctor_id": "DOC-1",
        "date": "2025-03-10",
        "time": time,
        "reason": "Fever",
        "mobilenumber": "9876543210",
        "status": "Pending"
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_timeslots_lists_the_doctor_day() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(get("/timeslots?doctor_id=DOC-1&date=2025-03-10"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let slots = body_json(response).await;
    assert_eq!(slots.as_array().unwrap().len(), 8);
    assert_eq!(slots[0], json!({"id": "1", "time": "09:00 AM", "available": true}));
}

#[tokio::test]
async fn test_timeslots_unknown_doctor_is_404() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(get("/timeslots?doctor_id=DOC-404&date=2025-03-10"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Doctor not found");
}

#[tokio::test]
async fn test_timeslots_requires_both_query_params() {
    let (app, _) = create_test_app().await;

    let response = app.oneshot(get("/timeslots?doctor_id=DOC-1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_then_slot_is_taken() {
    let (app, _) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/create", &booking_body("10:00 AM")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["detail"], "Appointment booked successfully");
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post_json("/create", &booking_body("10:00 AM")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Time slot already booked");

    let response = app
        .clone()
        .oneshot(get("/timeslots?doctor_id=DOC-1&date=2025-03-10"))
        .await
        .unwrap();
    let slots = body_json(response).await;
    let taken: Vec<&str> = slots
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["available"] == false)
        .map(|s| s["time"].as_str().unwrap())
        .collect();
    assert_eq!(taken, vec!["10:00 AM"]);

    let response = app.oneshot(get(&format!("/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["time"], "10:00 AM");
}

#[tokio::test]
async fn test_timeslots_with_unpadded_date_is_400() {
    let (app, _) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/create", &booking_body("10:00 AM")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get("/timeslots?doctor_id=DOC-1&date=2025-3-10"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid date '2025-3-10': expected YYYY-MM-DD"
    );
}

#[tokio::test]
async fn test_create_rejects_unoffered_slot() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(post_json("/create", &booking_body("07:00 PM")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_status_update_round_trip() {
    let (app, _) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/create", &booking_body("01:00 PM")))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("PUT")
        .uri("/status")
        .header("content-type", "application/json")
        .body(Body::from(json!({"id": id, "status": "Completed"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["detail"], "Appointment status updated");
    assert_eq!(updated["appointment"]["status"], "Completed");

    let response = app
        .oneshot(get("/doctor/DOC-1?status=Completed"))
        .await
        .unwrap();
    let listing = body_json(response).await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["appointments"][0]["id"], id.as_str());
}

#[tokio::test]
async fn test_status_update_unknown_id_is_404() {
    let (app, _) = create_test_app().await;

    let request = Request::builder()
        .method("PUT")
        .uri("/status")
        .header("content-type", "application/json")
        .body(Body::from(json!({"id": "nope", "status": "Completed"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Appointment not found");
}

#[tokio::test]
async fn test_patient_listing_empty() {
    let (app, _) = create_test_app().await;

    let response = app.oneshot(get("/patient/PID-1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"appointments": [], "total": 0}));
}

#[tokio::test]
async fn test_postgrest_conflict_surfaces_as_already_booked() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .and(query_param("doctorId", "eq.DOC-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "d1", "doctorId": "DOC-1", "name": "Dr. Meera Iyer"}
        ])))
        .mount(&server)
        .await;

    // The pre-check sees a free slot; a concurrent writer wins at the constraint.
    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AppConfig {
        store_backend: StoreBackend::Supabase,
        supabase_url: server.uri(),
        supabase_anon_key: "test-anon-key".to_string(),
        ..AppConfig::default()
    };
    let store = Arc::new(SupabaseClient::new(&config));
    let app = appointment_routes(Arc::new(AppState::new(config, store)));

    let response = app
        .oneshot(post_json("/create", &booking_body("09:00 AM")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Time slot already booked");
}

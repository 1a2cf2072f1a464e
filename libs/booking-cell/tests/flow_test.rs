use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use booking_cell::router::booking_routes;
use shared_config::AppConfig;
use shared_utils::test_utils::MockPlatformResponses;

fn test_config(mock_server: &MockServer) -> AppConfig {
    AppConfig {
        platform_api_url: mock_server.uri(),
        platform_api_key: "test-api-key".to_string(),
        session_jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
    }
}

async fn create_test_app(config: AppConfig) -> Router {
    booking_routes(Arc::new(config))
}

async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    (status, json_response)
}

async fn mount_doctor(mock_server: &MockServer, doctor_id: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/doctors/{}", doctor_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            MockPlatformResponses::doctor_response(doctor_id, "Dr. Test", "Cardiology"),
        ))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_flow_start_without_doctor_begins_at_specialty() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    let (status, body) = post_json(app, "/flow/start", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "specialty");
    assert!(body["notice"].is_null());
}

#[tokio::test]
async fn test_flow_deep_link_starts_at_schedule_with_slots() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    mount_doctor(&mock_server, "doc-1").await;
    Mock::given(method("GET"))
        .and(path("/doctor-schedules"))
        .and(query_param("doctorId", "doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockPlatformResponses::doctor_schedule_response(
                "doc-1",
                "2024-05-01T09:00:00Z",
                "2024-05-01T09:30:00Z",
                false
            ),
        ])))
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(app, "/flow/start", json!({ "doctorId": "doc-1" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "schedule");
    assert_eq!(body["state"]["deepLinked"], true);
    assert_eq!(body["state"]["daySections"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_flow_select_schedule_reaches_confirm() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mount_doctor(&mock_server, "doc-1").await;
    Mock::given(method("GET"))
        .and(path("/doctor-schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockPlatformResponses::doctor_schedule_response(
                "doc-1",
                "2024-05-01T09:00:00Z",
                "2024-05-01T09:30:00Z",
                false
            ),
        ])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(config.clone()).await;
    let (_, start) = post_json(app, "/flow/start", json!({ "doctorId": "doc-1" })).await;

    let schedule_id = start["state"]["daySections"][0]["slots"][0]["scheduleId"]
        .as_str()
        .unwrap()
        .to_string();

    let app = create_test_app(config).await;
    let (status, body) = post_json(
        app,
        "/flow/advance",
        json!({
            "state": start["state"],
            "event": { "type": "selectSchedule", "scheduleId": schedule_id }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "confirm");
    assert!(body["state"]["schedule"].is_object());
}

#[tokio::test]
async fn test_flow_slot_fetch_failure_leaves_empty_list_with_notice() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    mount_doctor(&mock_server, "doc-1").await;
    Mock::given(method("GET"))
        .and(path("/doctor-schedules"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_json(app, "/flow/start", json!({ "doctorId": "doc-1" })).await;

    // The flow survives; the failure is a notice, not an error.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"], "Failed to load schedules");
    assert_eq!(body["state"]["step"], "schedule");
    assert!(body["state"]["daySections"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_flow_rejects_schedule_before_doctor() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    let (_, start) = post_json(app, "/flow/start", json!({})).await;

    let app = create_test_app(test_config(&mock_server)).await;
    let (status, body) = post_json(
        app,
        "/flow/advance",
        json!({
            "state": start["state"],
            "event": { "type": "selectSchedule", "scheduleId": "sch-1" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not available"));
}

#[tokio::test]
async fn test_flow_back_after_deep_link_returns_to_specialty() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server);

    mount_doctor(&mock_server, "doc-1").await;
    Mock::given(method("GET"))
        .and(path("/doctor-schedules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let app = create_test_app(config.clone()).await;
    let (_, start) = post_json(app, "/flow/start", json!({ "doctorId": "doc-1" })).await;

    let app = create_test_app(config).await;
    let (status, body) = post_json(
        app,
        "/flow/advance",
        json!({
            "state": start["state"],
            "event": { "type": "back" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"]["step"], "specialty");
}

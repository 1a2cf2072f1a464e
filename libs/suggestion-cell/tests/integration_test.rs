use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_config::AppConfig;
use suggestion_cell::router::suggestion_routes;

fn test_config(mock_server: &MockServer) -> AppConfig {
    AppConfig {
        platform_api_url: mock_server.uri(),
        platform_api_key: "test-api-key".to_string(),
        session_jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
    }
}

async fn create_test_app(config: AppConfig) -> Router {
    suggestion_routes(Arc::new(config))
}

async fn post_symptoms(app: Router, symptoms: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "symptoms": symptoms }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json_response: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    (status, json_response)
}

#[tokio::test]
async fn test_short_symptoms_rejected_without_network_call() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    Mock::given(method("POST"))
        .and(path("/ai/doctor-suggestion"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Four characters after trimming.
    let (status, body) = post_symptoms(app, "  achy  ").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("at least 5 characters"));
}

#[tokio::test]
async fn test_five_characters_is_enough() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    Mock::given(method("POST"))
        .and(path("/ai/doctor-suggestion"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(
                shared_utils::test_utils::MockPlatformResponses::suggestion_response(),
            ),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = post_symptoms(app, "fever").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["urgencyLevel"], "medium");
    assert_eq!(body["suggestedSpecialties"].as_array().unwrap().len(), 2);
    assert!(!body["recommendations"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_loosely_typed_doctor_field_normalizes() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    Mock::given(method("POST"))
        .and(path("/ai/doctor-suggestion"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urgencyLevel": "HIGH",
            "suggestedDoctors": "Dr. Ayesha Rahman",
            "recommendations": "Seek care today."
        })))
        .mount(&mock_server)
        .await;

    let (status, body) = post_symptoms(app, "chest pain and shortness of breath").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["urgencyLevel"], "high");
    assert_eq!(body["suggestedDoctors"], json!(["Dr. Ayesha Rahman"]));
    assert_eq!(body["suggestedSpecialties"], json!([]));
}

#[tokio::test]
async fn test_upstream_failure_returns_inline_error() {
    let mock_server = MockServer::start().await;
    let app = create_test_app(test_config(&mock_server)).await;

    Mock::given(method("POST"))
        .and(path("/ai/doctor-suggestion"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&mock_server)
        .await;

    let (status, body) = post_symptoms(app, "persistent headache").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

//! Integration tests for the submission and polling endpoints.
//!
//! No upstream is dialled here: with no credentials configured, every
//! path must short-circuit with the auth-missing signal before any HTTP
//! call, and selector validation happens before that.

mod common;

use axum::http::StatusCode;
use common::{default_test_app, error_code, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: submission without credentials answers 401 AUTH_MISSING
// ---------------------------------------------------------------------------

#[tokio::test]
async fn generate_without_credentials_returns_401() {
    let app = default_test_app();
    let response = post_json(app, "/generate", json!({"prompt": "a fox"})).await;

    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "AUTH_MISSING");
}

#[tokio::test]
async fn generate_fast_alias_behaves_like_generate() {
    let app = default_test_app();
    let response = post_json(app, "/generate-fast", json!({"prompt": "a fox"})).await;

    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "AUTH_MISSING");
}

#[tokio::test]
async fn generate_quality_without_credentials_returns_401() {
    let app = default_test_app();
    let response = post_json(app, "/generate-quality", json!({"prompt": "a fox"})).await;

    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "AUTH_MISSING");
}

// ---------------------------------------------------------------------------
// Test: the auth-missing message names the selected provider
// ---------------------------------------------------------------------------

#[tokio::test]
async fn auth_error_names_the_query_selected_provider() {
    let app = default_test_app();
    let response = post_json(app, "/generate?provider=fal", json!({"prompt": "x"})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert!(
        json["error"].as_str().unwrap().contains("fal"),
        "expected fal in: {}",
        json["error"],
    );
}

#[tokio::test]
async fn body_provider_selector_is_honoured() {
    let app = default_test_app();
    let response = post_json(app, "/generate", json!({"prompt": "x", "provider": "fal"})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("fal"));
}

#[tokio::test]
async fn query_selector_beats_body_selector() {
    let app = default_test_app();
    let response = post_json(
        app,
        "/generate?provider=kie",
        json!({"prompt": "x", "provider": "fal"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("kie"));
}

// ---------------------------------------------------------------------------
// Test: unknown provider selector is a 400, not a silent default
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_provider_selector_returns_400() {
    let app = default_test_app();
    let response = post_json(app, "/generate?provider=veo", json!({"prompt": "x"})).await;

    let code = error_code(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Test: polling without credentials answers 401 immediately
// ---------------------------------------------------------------------------

#[tokio::test]
async fn poll_without_credentials_returns_401() {
    let app = default_test_app();
    let started = std::time::Instant::now();
    let response = get(app, "/result/abcdefghij").await;

    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "AUTH_MISSING");
    // Short-circuit means no poll waits were taken.
    assert!(started.elapsed() < std::time::Duration::from_secs(1));
}

#[tokio::test]
async fn poll_with_fal_selector_returns_401() {
    let app = default_test_app();
    let response = get(app, "/result/abcdefghij?provider=fal").await;

    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "AUTH_MISSING");
}

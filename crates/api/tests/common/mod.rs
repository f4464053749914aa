use std::path::Path;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use clipgate_api::app;
use clipgate_api::config::ServerConfig;
use clipgate_api::state::AppState;
use clipgate_providers::config::TierModels;
use clipgate_providers::{ElevenConfig, FalConfig, KieConfig, ProviderKind};

/// Build a test `ServerConfig` with safe defaults: one explicit CORS
/// origin (so preflight assertions are deterministic), mux disabled, and
/// a caller-supplied static root.
pub fn test_config(static_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upstream_timeout_secs: 15,
        default_provider: ProviderKind::Kie,
        static_root: static_root.to_path_buf(),
        enable_mux: false,
        ffmpeg_path: "ffmpeg".to_string(),
    }
}

fn test_models() -> TierModels {
    TierModels {
        fast: "V3_5".to_string(),
        quality: "V4_5PLUS".to_string(),
    }
}

/// Provider configs with no credentials. Base URLs point at a closed
/// local port, but nothing should ever be dialled: every handler checks
/// credentials first.
pub fn unauthenticated_kie() -> KieConfig {
    KieConfig {
        api_key: String::new(),
        api_prefix: "http://127.0.0.1:9".to_string(),
        fast_path: "/generate".to_string(),
        quality_path: "/generate".to_string(),
        result_paths: vec!["/result/:id".to_string(), "/status/:id".to_string()],
        models: test_models(),
    }
}

pub fn unauthenticated_fal() -> FalConfig {
    FalConfig {
        credentials: None,
        base_url: "http://127.0.0.1:9".to_string(),
        submit_path: "/v1/veo/submit".to_string(),
        result_base: "/v1/veo/requests".to_string(),
        models: test_models(),
    }
}

pub fn unauthenticated_eleven() -> ElevenConfig {
    ElevenConfig {
        api_key: String::new(),
        base_url: "http://127.0.0.1:9".to_string(),
    }
}

/// Build the full application router with all middleware layers,
/// mirroring production construction via `app::build_app`.
pub fn build_test_app(config: ServerConfig) -> Router {
    let state = AppState::new(
        config,
        unauthenticated_kie(),
        unauthenticated_fal(),
        unauthenticated_eleven(),
    );
    app::build_app(state)
}

/// Convenience: a test app rooted in a throwaway static dir.
pub fn default_test_app() -> Router {
    build_test_app(test_config(&std::env::temp_dir()))
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the standard error envelope and return its `code`.
pub async fn error_code(response: Response<Body>, expected_status: StatusCode) -> String {
    assert_eq!(response.status(), expected_status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string(), "error must carry a message");
    json["code"].as_str().expect("error code").to_string()
}

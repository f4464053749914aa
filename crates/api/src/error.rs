use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clipgate_core::ffmpeg::FfmpegError;
use clipgate_providers::ProviderError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ProviderError`] for upstream failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An error from one of the upstream clients.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// An ffmpeg failure during the mux step.
    #[error("ffmpeg error: {0}")]
    Ffmpeg(#[from] FfmpegError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested feature is disabled by configuration.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An upstream dependency could not be reached or answered garbage.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Provider(provider) => match provider {
                ProviderError::AuthMissing { .. } => {
                    (StatusCode::UNAUTHORIZED, "AUTH_MISSING", self.to_string())
                }
                ProviderError::Upstream { status, body } => (
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                    "UPSTREAM_ERROR",
                    body.clone(),
                ),
                ProviderError::Request(err) => {
                    tracing::warn!(error = %err, "upstream request failed");
                    (StatusCode::BAD_GATEWAY, "UPSTREAM_UNREACHABLE", err.to_string())
                }
            },

            AppError::Ffmpeg(err) => {
                tracing::error!(error = %err, "mux failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "MUX_FAILED", err.to_string())
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "success": false,
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_missing_maps_to_401() {
        let err = AppError::Provider(ProviderError::AuthMissing { provider: "kie" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_status_is_preserved() {
        let err = AppError::Provider(ProviderError::Upstream {
            status: 429,
            body: "quota".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn invalid_upstream_status_falls_back_to_502() {
        let err = AppError::Provider(ProviderError::Upstream {
            status: 42,
            body: "weird".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}

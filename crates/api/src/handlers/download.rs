//! Byte-range-aware download proxy.
//!
//! Streams an upstream asset back to the caller with a forced
//! `Content-Disposition: attachment`, so a browser saves the file instead
//! of navigating to a CDN URL it may not be allowed to fetch directly.
//! The caller's `Range` header is forwarded and the upstream's partial
//! response (status and range headers) is passed straight through.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Response;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub url: Option<String>,
}

/// GET /download?url=
pub async fn download(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("url query parameter required".into()))?;

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::BadRequest("url must be an absolute http(s) URL".into()));
    }

    let mut upstream_request = state.http.get(&url);
    if let Some(range) = headers.get(header::RANGE) {
        upstream_request = upstream_request.header(header::RANGE, range);
    }

    let upstream = upstream_request
        .send()
        .await
        .map_err(|e| AppError::BadGateway(format!("Upstream fetch failed: {e}")))?;

    let status = upstream.status();
    if !status.is_success() {
        return Err(AppError::BadGateway(format!(
            "Upstream answered {status}",
        )));
    }

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::OK))
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename_from_url(&url)),
        );

    for name in [
        header::CONTENT_TYPE,
        header::CONTENT_LENGTH,
        header::CONTENT_RANGE,
        header::ACCEPT_RANGES,
    ] {
        if let Some(value) = upstream.headers().get(&name) {
            builder = builder.header(&name, value);
        }
    }

    builder
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// Derive a save-as filename from the URL path, ignoring query and
/// fragment. Falls back to a generic name when the path has none.
fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or_default();
    let name: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if name.is_empty() {
        "download.bin".to_string()
    } else {
        name
    }
}

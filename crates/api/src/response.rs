//! Shared response envelope for the generation endpoints.
//!
//! Submission and polling both answer with the same shape so the front
//! end has a single code path: `{ success, provider, job_id, pending,
//! video_url, meta, error? }`.

use axum::http::StatusCode;
use axum::Json;
use clipgate_core::{JobStatus, ProviderJob};
use clipgate_providers::ProviderKind;
use serde::Serialize;
use serde_json::Value;

/// Caller-facing view of a submission or resolution outcome.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub provider: &'static str,
    pub job_id: Option<String>,
    pub pending: bool,
    pub video_url: Option<String>,
    /// Raw provider payload, retained for diagnostics.
    pub meta: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    /// Map a normalized job to the envelope and its HTTP status:
    /// 200 resolved, 202 pending, the provider's own status (or 502) on
    /// failure.
    pub fn from_job(kind: ProviderKind, job: ProviderJob) -> (StatusCode, Json<Self>) {
        let status = match job.status {
            JobStatus::Resolved => StatusCode::OK,
            JobStatus::Pending => StatusCode::ACCEPTED,
            JobStatus::Failed => job
                .upstream_status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::BAD_GATEWAY),
        };

        let body = Self {
            success: job.status != JobStatus::Failed,
            provider: kind.as_str(),
            job_id: job.identifier,
            pending: job.status == JobStatus::Pending,
            video_url: job.result_url,
            meta: job.raw_payload,
            error: job.error,
        };

        (status, Json(body))
    }

    /// Envelope for a cache hit: no provider payload exists, so `meta` is
    /// null.
    pub fn cached(kind: ProviderKind, job_id: String, video_url: String) -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                success: true,
                provider: kind.as_str(),
                job_id: Some(job_id),
                pending: false,
                video_url: Some(video_url),
                meta: Value::Null,
                error: None,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolved_job_maps_to_200() {
        let job = ProviderJob::resolved(Some("id0123456789".into()), "https://cdn/v.mp4".into(), json!({}));
        let (status, Json(body)) = GenerationResponse::from_job(ProviderKind::Kie, job);
        assert_eq!(status, StatusCode::OK);
        assert!(body.success && !body.pending);
        assert_eq!(body.video_url.as_deref(), Some("https://cdn/v.mp4"));
    }

    #[test]
    fn pending_job_maps_to_202() {
        let job = ProviderJob::pending(Some("id0123456789".into()), json!({}));
        let (status, Json(body)) = GenerationResponse::from_job(ProviderKind::Fal, job);
        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body.success && body.pending);
        assert_eq!(body.provider, "fal");
    }

    #[test]
    fn failed_job_carries_the_upstream_status() {
        let job = ProviderJob::failed("nope".into(), Some(400), json!({"error": "nope"}));
        let (status, Json(body)) = GenerationResponse::from_job(ProviderKind::Kie, job);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("nope"));
    }
}

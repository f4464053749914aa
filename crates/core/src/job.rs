//! The adapter-side view of one in-flight generation job.

use serde::Serialize;
use serde_json::Value;

/// Lifecycle state of a [`ProviderJob`].
///
/// Transitions only ever go `Pending -> Resolved` or stay `Pending` when a
/// retry budget runs out; a failed submission is `Failed` from the start
/// and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// A playable asset URL was found.
    Resolved,
    /// Accepted upstream, no result yet. The caller re-polls by identifier.
    Pending,
    /// The provider rejected the submission.
    Failed,
}

/// Normalized outcome of a provider submission or resolution pass.
///
/// Invariants, enforced by the constructors:
/// - `Resolved` always carries a non-empty `result_url`.
/// - `Failed` always carries an `error` message and never a `result_url`.
/// - `identifier` is absent when the provider answered synchronously or
///   when neither a URL nor an identifier could be extracted (the terminal
///   ambiguous state -- the caller cannot resume polling).
#[derive(Debug, Clone, Serialize)]
pub struct ProviderJob {
    /// Opaque provider-assigned job identifier.
    pub identifier: Option<String>,
    pub status: JobStatus,
    /// Present only when `status == Resolved`.
    pub result_url: Option<String>,
    /// Present only when `status == Failed`.
    pub error: Option<String>,
    /// HTTP status the provider answered with, when one was received.
    pub upstream_status: Option<u16>,
    /// The unmodified provider response, retained for diagnostics.
    pub raw_payload: Value,
}

impl ProviderJob {
    pub fn resolved(identifier: Option<String>, result_url: String, raw_payload: Value) -> Self {
        debug_assert!(!result_url.is_empty());
        Self {
            identifier,
            status: JobStatus::Resolved,
            result_url: Some(result_url),
            error: None,
            upstream_status: None,
            raw_payload,
        }
    }

    pub fn pending(identifier: Option<String>, raw_payload: Value) -> Self {
        Self {
            identifier,
            status: JobStatus::Pending,
            result_url: None,
            error: None,
            upstream_status: None,
            raw_payload,
        }
    }

    pub fn failed(error: String, upstream_status: Option<u16>, raw_payload: Value) -> Self {
        Self {
            identifier: None,
            status: JobStatus::Failed,
            result_url: None,
            error: Some(error),
            upstream_status,
            raw_payload,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == JobStatus::Resolved
    }

    pub fn is_pending(&self) -> bool {
        self.status == JobStatus::Pending
    }

    pub fn is_failed(&self) -> bool {
        self.status == JobStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn exactly_one_outcome_indicator_is_set() {
        let resolved = ProviderJob::resolved(Some("id".into()), "https://x/a.mp4".into(), json!({}));
        assert!(resolved.result_url.is_some() && resolved.error.is_none());

        let pending = ProviderJob::pending(Some("id".into()), json!({}));
        assert!(pending.result_url.is_none() && pending.error.is_none());

        let failed = ProviderJob::failed("boom".into(), Some(400), json!({}));
        assert!(failed.result_url.is_none() && failed.error.is_some());
        assert!(failed.identifier.is_none());
    }
}

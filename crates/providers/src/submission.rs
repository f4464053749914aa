//! Submission-outcome normalization shared by both video providers.

use clipgate_core::{extract, ProviderJob};
use serde_json::Value;

use crate::error::ProviderError;
use crate::poller::{self, PollConfig};
use crate::provider::VideoProvider;

/// Parse a provider response body as JSON, retaining non-JSON bodies as
/// `{"raw": <text>}` so diagnostics never lose the original answer.
pub(crate) fn parse_payload(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::json!({ "raw": text }))
}

/// Best available human-readable message for a rejected submission.
pub(crate) fn rejection_message(payload: &Value, status: u16, provider: &str) -> String {
    payload
        .get("error")
        .and_then(error_text)
        .or_else(|| payload.get("raw").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("{provider} submit failed with status {status}"))
}

/// An `error` field may be a bare string or a structured object.
fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        _ => None,
    }
}

/// Turn a submission response into a [`ProviderJob`].
///
/// - non-success status: failed, carrying the upstream status and body;
/// - a URL in the body wins over any identifier (no need to poll);
/// - an identifier hands off to a short inline poll before answering;
/// - neither is the terminal ambiguous state: pending without identifier.
pub(crate) async fn normalize_submission(
    provider: &dyn VideoProvider,
    status: u16,
    success: bool,
    payload: Value,
    inline_poll: &PollConfig,
) -> Result<ProviderJob, ProviderError> {
    if !success {
        let message = rejection_message(&payload, status, provider.kind().as_str());
        return Ok(ProviderJob::failed(message, Some(status), payload));
    }

    let identifier = extract::find_job_id(&payload);

    if let Some(url) = extract::find_video_url(&payload) {
        tracing::info!(provider = %provider.kind(), url = %url, "submission resolved synchronously");
        return Ok(ProviderJob::resolved(identifier, url, payload));
    }

    let Some(identifier) = identifier else {
        tracing::warn!(provider = %provider.kind(), "no url or identifier in submission response");
        return Ok(ProviderJob::pending(None, payload));
    };

    tracing::info!(provider = %provider.kind(), identifier = %identifier, "job accepted, polling inline");
    let polled = poller::resolve(provider, &identifier, inline_poll).await?;
    if polled.is_resolved() {
        return Ok(polled);
    }

    // Inline budget exhausted -- report pending with the submission payload
    // so the caller sees what the provider originally said.
    Ok(ProviderJob::pending(Some(identifier), payload))
}

//! The resolution poller: turns a provider job identifier into a playable
//! asset URL by querying the provider's result endpoints on a fixed
//! schedule.
//!
//! The backoff is deliberately two-tier rather than exponential: provider
//! jobs for short clips typically complete within 10-40 seconds, so one
//! short initial wait followed by a flat steady wait polls neither too
//! aggressively at the start nor too lazily at the end.

use std::sync::Arc;
use std::time::Duration;

use clipgate_core::{extract, ProviderJob, ResultCache};
use serde_json::Value;

use crate::error::ProviderError;
use crate::provider::VideoProvider;

/// Tunable parameters for one resolution pass.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Total fetch attempts before giving up and reporting pending.
    pub attempts: u32,
    /// Wait before the first attempt.
    pub initial_delay: Duration,
    /// Wait before every subsequent attempt.
    pub steady_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            attempts: 5,
            initial_delay: Duration::from_secs(3),
            steady_delay: Duration::from_secs(6),
        }
    }
}

impl PollConfig {
    /// Shorter budget used inline during submission, so the submit
    /// round-trip stays interactive while longer jobs fall through to the
    /// pending path.
    pub fn inline() -> Self {
        Self {
            attempts: 3,
            ..Self::default()
        }
    }

    /// Delay to apply before the given zero-based attempt.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            self.initial_delay
        } else {
            self.steady_delay
        }
    }
}

/// Poll `provider` for the result of `identifier` until a playable URL is
/// found or the retry budget is exhausted.
///
/// Budget exhaustion reports `pending`, not failed -- the job may still
/// complete, and this call is stateless and safe to repeat. Per-attempt
/// transport and parse problems are swallowed; the only fatal condition
/// is a missing credential, which returns before any wait or HTTP call.
pub async fn resolve(
    provider: &dyn VideoProvider,
    identifier: &str,
    config: &PollConfig,
) -> Result<ProviderJob, ProviderError> {
    if !provider.has_credentials() {
        return Err(ProviderError::AuthMissing {
            provider: provider.kind().as_str(),
        });
    }

    let mut last_payload: Option<Value> = None;

    for attempt in 0..config.attempts {
        tokio::time::sleep(config.delay_for(attempt)).await;

        match provider.fetch_result(identifier).await {
            Ok(Some(payload)) => {
                if let Some(url) = extract::find_video_url(&payload) {
                    tracing::info!(
                        provider = %provider.kind(),
                        identifier,
                        attempt = attempt + 1,
                        "job resolved",
                    );
                    return Ok(ProviderJob::resolved(
                        Some(identifier.to_string()),
                        url,
                        payload,
                    ));
                }
                last_payload = Some(payload);
            }
            Ok(None) => {}
            Err(err @ ProviderError::AuthMissing { .. }) => return Err(err),
            Err(err) => {
                // Transient; counts against the budget but never aborts it.
                tracing::warn!(
                    provider = %provider.kind(),
                    identifier,
                    attempt = attempt + 1,
                    error = %err,
                    "poll attempt failed",
                );
            }
        }
    }

    tracing::info!(
        provider = %provider.kind(),
        identifier,
        attempts = config.attempts,
        "retry budget exhausted, job still pending",
    );
    Ok(ProviderJob::pending(
        Some(identifier.to_string()),
        last_payload.unwrap_or(Value::Null),
    ))
}

/// Fire-and-forget variant: poll in a background task and record a
/// resolved URL in the shared cache instead of returning it.
///
/// There is no cancellation -- a caller that disconnects leaves the task
/// to finish or exhaust its budget on its own, and the result is simply
/// dropped if nobody reads the cache.
pub fn spawn_background(
    provider: Arc<dyn VideoProvider>,
    identifier: String,
    cache: Arc<ResultCache>,
    config: PollConfig,
) {
    tokio::spawn(async move {
        match resolve(provider.as_ref(), &identifier, &config).await {
            Ok(job) if job.is_resolved() => {
                if let Some(url) = &job.result_url {
                    cache.insert(&identifier, url).await;
                    tracing::info!(identifier = %identifier, url = %url, "background poll cached result");
                }
            }
            Ok(_) => {
                tracing::debug!(identifier = %identifier, "background poll exhausted, job still pending");
            }
            Err(err) => {
                tracing::warn!(identifier = %identifier, error = %err, "background poll aborted");
            }
        }
    });
}

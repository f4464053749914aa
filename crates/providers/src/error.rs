//! Error type shared by the upstream clients.

/// Errors from the provider HTTP layer.
///
/// An upstream *rejection* of a video submission is not an error here --
/// the adapters normalize it into a failed
/// [`ProviderJob`](clipgate_core::ProviderJob) so the original status and
/// body reach the caller. This enum covers the conditions that abort a
/// call outright.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Required credential is not configured. Fails fast: no HTTP call is
    /// made and no retry is attempted.
    #[error("{provider} credentials missing")]
    AuthMissing { provider: &'static str },

    /// The upstream answered with a non-success status where no normalized
    /// job shape exists (TTS and voice-listing calls).
    #[error("upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

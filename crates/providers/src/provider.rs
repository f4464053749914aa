//! The seam between the gateway and the interchangeable video providers.

use async_trait::async_trait;
use clipgate_core::{GenerationRequest, ModelTier, ProviderJob};
use serde_json::Value;

use crate::error::ProviderError;

/// Which upstream video provider a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Bearer-token provider (kie.ai style).
    Kie,
    /// Basic-auth provider (fal.ai style).
    Fal,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Kie => "kie",
            ProviderKind::Fal => "fal",
        }
    }

    /// Case-insensitive parse of a caller-supplied selector.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kie" => Some(ProviderKind::Kie),
            "fal" => Some(ProviderKind::Fal),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream video generation service.
///
/// Both implementations follow the same submission protocol; only the
/// wire shapes, endpoints, and auth scheme differ.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Whether a credential is configured. Every operation fails fast with
    /// [`ProviderError::AuthMissing`] when this is false.
    fn has_credentials(&self) -> bool;

    /// Submit a generation request and normalize the outcome.
    ///
    /// A synchronously returned asset URL resolves immediately; an
    /// accepted asynchronous job gets a short inline poll before the
    /// pending outcome is returned to the caller.
    async fn submit(
        &self,
        request: &GenerationRequest,
        tier: ModelTier,
    ) -> Result<ProviderJob, ProviderError>;

    /// One polling attempt: query each candidate result endpoint in
    /// declared order and return the first HTTP-success payload.
    ///
    /// Per-endpoint transport errors and non-success statuses are
    /// swallowed (logged) -- `Ok(None)` means "nothing this attempt", and
    /// the poller's retry budget decides when to give up.
    async fn fetch_result(&self, identifier: &str) -> Result<Option<Value>, ProviderError>;
}

pub mod diag;
pub mod download;
pub mod generate;
pub mod mux;
pub mod result;
pub mod tts;

use clipgate_providers::ProviderKind;
use serde::Deserialize;

use crate::error::AppError;

/// `?provider=` query parameter accepted by the generation endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderSelect {
    pub provider: Option<String>,
}

/// Resolve the provider for a request: query parameter first, then the
/// body field, then the configured default. An unrecognized selector is a
/// caller error rather than a silent fallback.
pub(crate) fn select_provider(
    query: &ProviderSelect,
    body_provider: Option<&str>,
    default: ProviderKind,
) -> Result<ProviderKind, AppError> {
    match query.provider.as_deref().or(body_provider) {
        Some(raw) => ProviderKind::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown provider '{raw}'"))),
        None => Ok(default),
    }
}

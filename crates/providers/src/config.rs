//! Environment parsing helpers shared by the provider configs.

use clipgate_core::ModelTier;

/// Provider model identifiers per tier, shared by both video providers.
#[derive(Debug, Clone)]
pub struct TierModels {
    pub fast: String,
    pub quality: String,
}

impl TierModels {
    /// Load from `VEO_MODEL_FAST` / `VEO_MODEL_QUALITY`.
    pub fn from_env() -> Self {
        Self {
            fast: env_or("VEO_MODEL_FAST", "V3_5"),
            quality: env_or("VEO_MODEL_QUALITY", "V4_5PLUS"),
        }
    }

    pub fn for_tier(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast,
            ModelTier::Quality => &self.quality,
        }
    }
}

/// Read an environment variable with a fallback default.
pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read the first non-empty variable out of a list of aliases.
pub(crate) fn env_first(keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Strip a single trailing slash from a configured base URL.
pub(crate) fn trim_base(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// Join a base URL and a path, tolerating a missing leading slash on the
/// path (configured paths come from env and are easy to mistype).
pub(crate) fn join_path(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Split a comma-separated list of path templates, preserving order.
pub(crate) fn split_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

//! Process-lifetime cache of resolved result URLs.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Best-effort map from provider job identifier to the last-known result
/// URL, used to short-circuit repeat polls for an already-resolved job.
///
/// There is no eviction: entries are a few dozen bytes, volume is low, and
/// the process is expected to be short-lived. This is a documented
/// unbounded-growth risk, not a feature. Last-write-wins is acceptable
/// because every writer agrees on the same eventual URL for a given
/// identifier.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<String, String>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-known result URL for `identifier`, if any resolution has
    /// completed since process start.
    pub async fn get(&self, identifier: &str) -> Option<String> {
        self.entries.read().await.get(identifier).cloned()
    }

    /// Record the result URL for `identifier`, replacing any prior entry.
    pub async fn insert(&self, identifier: &str, url: &str) {
        self.entries
            .write()
            .await
            .insert(identifier.to_string(), url.to_string());
    }

    /// Number of cached resolutions.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_none_for_unknown_identifier() {
        let cache = ResultCache::new();
        assert_eq!(cache.get("missing").await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn stores_and_returns_entries() {
        let cache = ResultCache::new();
        cache.insert("job-1", "https://cdn/a.mp4").await;
        assert_eq!(cache.get("job-1").await.as_deref(), Some("https://cdn/a.mp4"));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn last_write_wins() {
        let cache = ResultCache::new();
        cache.insert("job-1", "https://cdn/a.mp4").await;
        cache.insert("job-1", "https://cdn/b.mp4").await;
        assert_eq!(cache.get("job-1").await.as_deref(), Some("https://cdn/b.mp4"));
        assert_eq!(cache.len().await, 1);
    }
}

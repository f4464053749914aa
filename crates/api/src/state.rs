use std::sync::Arc;
use std::time::Duration;

use clipgate_core::ResultCache;
use clipgate_providers::{
    ElevenClient, ElevenConfig, FalClient, FalConfig, KieClient, KieConfig, ProviderKind,
    VideoProvider,
};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`. Cheaply cloneable -- everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub kie: Arc<KieClient>,
    pub fal: Arc<FalClient>,
    pub eleven: Arc<ElevenClient>,
    /// Identifier -> result URL cache shared by handlers and background
    /// polls.
    pub cache: Arc<ResultCache>,
    /// Shared upstream HTTP client (also used for mux downloads and the
    /// download proxy).
    pub http: reqwest::Client,
}

impl AppState {
    /// Wire up state from explicit configs. The shared `reqwest::Client`
    /// carries the per-call upstream timeout so a stalled provider call
    /// cannot eat a whole retry budget.
    pub fn new(
        config: ServerConfig,
        kie: KieConfig,
        fal: FalConfig,
        eleven: ElevenConfig,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .expect("failed to build HTTP client");

        Self {
            config: Arc::new(config),
            kie: Arc::new(KieClient::new(http.clone(), kie)),
            fal: Arc::new(FalClient::new(http.clone(), fal)),
            eleven: Arc::new(ElevenClient::new(http.clone(), eleven)),
            cache: Arc::new(ResultCache::new()),
            http,
        }
    }

    /// Wire up state entirely from environment variables.
    pub fn from_env(config: ServerConfig) -> Self {
        Self::new(
            config,
            KieConfig::from_env(),
            FalConfig::from_env(),
            ElevenConfig::from_env(),
        )
    }

    /// The client for a selected provider, as a trait object.
    pub fn provider(&self, kind: ProviderKind) -> Arc<dyn VideoProvider> {
        match kind {
            ProviderKind::Kie => Arc::clone(&self.kie) as Arc<dyn VideoProvider>,
            ProviderKind::Fal => Arc::clone(&self.fal) as Arc<dyn VideoProvider>,
        }
    }
}

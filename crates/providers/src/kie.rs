//! The bearer-token video provider (kie.ai style API).
//!
//! Submission goes to a tier-specific path under a configurable API
//! prefix; results are polled through an ordered list of path templates
//! with `:id` placeholders, because the upstream exposes several
//! equivalent polling routes and deployments differ in which one works.

use async_trait::async_trait;
use clipgate_core::{GenerationRequest, ModelTier, ProviderJob};
use serde::Serialize;
use serde_json::Value;

use crate::config::{env_or, join_path, split_paths, trim_base, TierModels};
use crate::error::ProviderError;
use crate::poller::PollConfig;
use crate::provider::{ProviderKind, VideoProvider};
use crate::submission::{normalize_submission, parse_payload};

/// Configuration for the bearer-token provider.
#[derive(Debug, Clone)]
pub struct KieConfig {
    /// API key; empty means credentials are missing.
    pub api_key: String,
    /// Base URL prefix, no trailing slash.
    pub api_prefix: String,
    /// Submit path for the fast tier.
    pub fast_path: String,
    /// Submit path for the quality tier.
    pub quality_path: String,
    /// Result path templates with `:id` placeholders, tried in order.
    pub result_paths: Vec<String>,
    pub models: TierModels,
}

impl KieConfig {
    /// Load from environment variables.
    ///
    /// | Env Var            | Default                             |
    /// |--------------------|-------------------------------------|
    /// | `KIE_KEY`          | *(empty -- auth missing)*           |
    /// | `KIE_API_PREFIX`   | `https://api.kie.ai/api/v1/veo3`    |
    /// | `KIE_FAST_PATH`    | `/generate` (alias `VEO_FAST_PATH`) |
    /// | `KIE_QUALITY_PATH` | `/generate`                         |
    /// | `KIE_RESULT_PATHS` | `/result/:id,/status/:id`           |
    pub fn from_env() -> Self {
        let fast_path = std::env::var("KIE_FAST_PATH")
            .or_else(|_| std::env::var("VEO_FAST_PATH"))
            .unwrap_or_else(|_| "/generate".to_string());

        Self {
            api_key: env_or("KIE_KEY", ""),
            api_prefix: trim_base(&env_or("KIE_API_PREFIX", "https://api.kie.ai/api/v1/veo3")),
            fast_path,
            quality_path: env_or("KIE_QUALITY_PATH", "/generate"),
            result_paths: split_paths(&env_or("KIE_RESULT_PATHS", "/result/:id,/status/:id")),
            models: TierModels::from_env(),
        }
    }
}

/// Wire shape of a submission. This provider speaks camelCase; the fields
/// below are exactly the ones it accepts -- caller extras are not spread
/// into the body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KieSubmission<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enable_audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
}

impl<'a> KieSubmission<'a> {
    fn from_request(request: &'a GenerationRequest, model: &'a str) -> Self {
        Self {
            model,
            prompt: &request.prompt,
            aspect_ratio: request.aspect_ratio.as_deref(),
            duration: request.duration,
            resolution: request.resolution.as_deref(),
            enable_audio: request.audio,
            seed: request.seed,
            negative_prompt: request.negative_prompt.as_deref(),
            style: request.style.as_deref(),
        }
    }
}

/// HTTP client for the bearer-token provider.
pub struct KieClient {
    http: reqwest::Client,
    config: KieConfig,
    inline_poll: PollConfig,
}

impl KieClient {
    pub fn new(http: reqwest::Client, config: KieConfig) -> Self {
        Self {
            http,
            config,
            inline_poll: PollConfig::inline(),
        }
    }

    pub fn config(&self) -> &KieConfig {
        &self.config
    }

    fn submit_url(&self, tier: ModelTier) -> String {
        let path = match tier {
            ModelTier::Fast => &self.config.fast_path,
            ModelTier::Quality => &self.config.quality_path,
        };
        join_path(&self.config.api_prefix, path)
    }

    /// Concrete result URLs for an identifier, in declared template order.
    fn result_urls(&self, identifier: &str) -> Vec<String> {
        self.config
            .result_paths
            .iter()
            .map(|template| join_path(&self.config.api_prefix, &template.replace(":id", identifier)))
            .collect()
    }
}

#[async_trait]
impl VideoProvider for KieClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Kie
    }

    fn has_credentials(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn submit(
        &self,
        request: &GenerationRequest,
        tier: ModelTier,
    ) -> Result<ProviderJob, ProviderError> {
        if !self.has_credentials() {
            return Err(ProviderError::AuthMissing { provider: "kie" });
        }

        let model = self.config.models.for_tier(tier);
        let body = KieSubmission::from_request(request, model);
        let url = self.submit_url(tier);

        tracing::info!(url = %url, model, tier = tier.as_str(), "submitting generation job");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let payload = parse_payload(&response.text().await?);

        normalize_submission(self, status.as_u16(), status.is_success(), payload, &self.inline_poll)
            .await
    }

    async fn fetch_result(&self, identifier: &str) -> Result<Option<Value>, ProviderError> {
        if !self.has_credentials() {
            return Err(ProviderError::AuthMissing { provider: "kie" });
        }

        for url in self.result_urls(identifier) {
            match self
                .http
                .get(&url)
                .bearer_auth(&self.config.api_key)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => match response.text().await {
                    Ok(text) => return Ok(Some(parse_payload(&text))),
                    Err(err) => {
                        tracing::warn!(url = %url, error = %err, "failed to read result body");
                    }
                },
                Ok(response) => {
                    tracing::debug!(url = %url, status = %response.status(), "result endpoint non-success");
                }
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "result endpoint unreachable");
                }
            }
        }

        Ok(None)
    }
}

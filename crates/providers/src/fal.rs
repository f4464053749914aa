//! The basic-auth video provider (fal.ai style API).
//!
//! Credentials are an id+secret pair, configured either as two separate
//! variables or as a single `id:secret` value. Submission goes to one
//! fixed path; results are fetched from a single base path with the job
//! identifier appended.

use async_trait::async_trait;
use clipgate_core::{GenerationRequest, ModelTier, ProviderJob};
use serde::Serialize;
use serde_json::Value;

use crate::config::{env_or, join_path, trim_base, TierModels};
use crate::error::ProviderError;
use crate::poller::PollConfig;
use crate::provider::{ProviderKind, VideoProvider};
use crate::submission::{normalize_submission, parse_payload};

/// Configuration for the basic-auth provider.
#[derive(Debug, Clone)]
pub struct FalConfig {
    /// Basic-auth id+secret pair; `None` means credentials are missing.
    pub credentials: Option<(String, String)>,
    /// Base URL, no trailing slash.
    pub base_url: String,
    pub submit_path: String,
    /// Result base path; the identifier is appended as a path segment.
    pub result_base: String,
    pub models: TierModels,
}

impl FalConfig {
    /// Load from environment variables.
    ///
    /// | Env Var           | Default                                  |
    /// |-------------------|------------------------------------------|
    /// | `FAL_KEY_ID`      | *(empty)*                                |
    /// | `FAL_KEY_SECRET`  | *(empty)*                                |
    /// | `FAL_KEY`         | *(alternative `id:secret` form)*         |
    /// | `FAL_API_BASE`    | `https://api.fal.ai`                     |
    /// | `FAL_SUBMIT_PATH` | `/v1/pipelines/google/veo/submit`        |
    /// | `FAL_RESULT_BASE` | `/v1/pipelines/google/veo/requests`      |
    pub fn from_env() -> Self {
        Self {
            credentials: credentials_from_parts(
                &env_or("FAL_KEY_ID", ""),
                &env_or("FAL_KEY_SECRET", ""),
                &env_or("FAL_KEY", ""),
            ),
            base_url: trim_base(&env_or("FAL_API_BASE", "https://api.fal.ai")),
            submit_path: env_or("FAL_SUBMIT_PATH", "/v1/pipelines/google/veo/submit"),
            result_base: trim_base(&env_or(
                "FAL_RESULT_BASE",
                "/v1/pipelines/google/veo/requests",
            )),
            models: TierModels::from_env(),
        }
    }
}

/// Resolve the id+secret pair: explicit parts win, then the combined
/// `id:secret` form; anything else means no credentials.
fn credentials_from_parts(id: &str, secret: &str, combined: &str) -> Option<(String, String)> {
    if !id.is_empty() && !secret.is_empty() {
        return Some((id.to_string(), secret.to_string()));
    }
    combined
        .split_once(':')
        .filter(|(id, secret)| !id.is_empty() && !secret.is_empty())
        .map(|(id, secret)| (id.to_string(), secret.to_string()))
}

/// Wire shape of a submission. This provider speaks snake_case; the
/// fields below are exactly the ones it accepts.
#[derive(Debug, Serialize)]
struct FalSubmission<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generate_audio: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<&'a str>,
}

impl<'a> FalSubmission<'a> {
    fn from_request(request: &'a GenerationRequest, model: &'a str) -> Self {
        Self {
            model,
            prompt: &request.prompt,
            aspect_ratio: request.aspect_ratio.as_deref(),
            duration: request.duration,
            resolution: request.resolution.as_deref(),
            generate_audio: request.audio,
            seed: request.seed,
            negative_prompt: request.negative_prompt.as_deref(),
            style: request.style.as_deref(),
        }
    }
}

/// HTTP client for the basic-auth provider.
pub struct FalClient {
    http: reqwest::Client,
    config: FalConfig,
    inline_poll: PollConfig,
}

impl FalClient {
    pub fn new(http: reqwest::Client, config: FalConfig) -> Self {
        Self {
            http,
            config,
            inline_poll: PollConfig::inline(),
        }
    }

    pub fn config(&self) -> &FalConfig {
        &self.config
    }

    fn submit_url(&self) -> String {
        join_path(&self.config.base_url, &self.config.submit_path)
    }

    fn result_url(&self, identifier: &str) -> String {
        format!(
            "{}/{identifier}",
            join_path(&self.config.base_url, &self.config.result_base),
        )
    }

    /// Apply basic auth to a request builder. Callers check
    /// [`has_credentials`](VideoProvider::has_credentials) first.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.credentials {
            Some((id, secret)) => builder.basic_auth(id, Some(secret)),
            None => builder,
        }
    }
}

#[async_trait]
impl VideoProvider for FalClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Fal
    }

    fn has_credentials(&self) -> bool {
        self.config.credentials.is_some()
    }

    async fn submit(
        &self,
        request: &GenerationRequest,
        tier: ModelTier,
    ) -> Result<ProviderJob, ProviderError> {
        if !self.has_credentials() {
            return Err(ProviderError::AuthMissing { provider: "fal" });
        }

        let model = self.config.models.for_tier(tier);
        let body = FalSubmission::from_request(request, model);
        let url = self.submit_url();

        tracing::info!(url = %url, model, tier = tier.as_str(), "submitting generation job");

        let response = self
            .authorize(self.http.post(&url))
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
            return Err(ProviderError::AuthMissing { provider: "fal" });
        }

        let url = self.result_url(identifier);
        match self.authorize(self.http.get(&url)).send().await {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(text) => Ok(Some(parse_payload(&text))),
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "failed to read result body");
                    Ok(None)
                }
            },
            Ok(response) => {
                tracing::debug!(url = %url, status = %response.status(), "result endpoint non-success");
                Ok(None)
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "result endpoint unreachable");
                Ok(None)
            }
        }
    }
}

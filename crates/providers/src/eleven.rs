//! ElevenLabs text-to-speech client.
//!
//! Two call shapes: a buffered synthesis that returns the full MP3 for
//! saving to disk, and a streaming synthesis that hands the raw upstream
//! response back for byte-for-byte forwarding.

use serde::{Deserialize, Serialize};

use crate::config::env_first;
use crate::error::ProviderError;

const API_BASE: &str = "https://api.elevenlabs.io/v1";

/// Model used when the caller does not specify one.
pub const DEFAULT_TTS_MODEL: &str = "eleven_multilingual_v2";

/// ElevenLabs configuration.
#[derive(Debug, Clone)]
pub struct ElevenConfig {
    /// API key; empty means credentials are missing.
    pub api_key: String,
    /// Base URL, overridable for tests.
    pub base_url: String,
}

impl ElevenConfig {
    /// Load from `ELEVENLABS_API_KEY`, falling back to the legacy
    /// `ELEVEN_LABS` / `ELEVEN_LABS_API_KEY` spellings.
    pub fn from_env() -> Self {
        Self {
            api_key: env_first(&["ELEVENLABS_API_KEY", "ELEVEN_LABS", "ELEVEN_LABS_API_KEY"]),
            base_url: API_BASE.to_string(),
        }
    }
}

/// One available voice, reduced to the fields the front end needs.
#[derive(Debug, Clone, Serialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    pub category: String,
}

/// Raw voice entry as the API returns it. The id field name has drifted
/// across API revisions, so both spellings are accepted.
#[derive(Debug, Deserialize)]
struct RawVoice {
    voice_id: Option<String>,
    id: Option<String>,
    name: String,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VoicesEnvelope {
    voices: Vec<RawVoice>,
}

/// Tunable synthesis parameters, all defaulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    #[serde(default = "default_stability")]
    pub stability: f64,
    #[serde(default = "default_similarity_boost")]
    pub similarity_boost: f64,
    #[serde(default)]
    pub style: f64,
    #[serde(default = "default_speaker_boost")]
    pub use_speaker_boost: bool,
}

fn default_stability() -> f64 {
    0.45
}

fn default_similarity_boost() -> f64 {
    0.8
}

fn default_speaker_boost() -> bool {
    true
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: default_stability(),
            similarity_boost: default_similarity_boost(),
            style: 0.0,
            use_speaker_boost: default_speaker_boost(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: &'a VoiceSettings,
}

/// HTTP client for the ElevenLabs API.
pub struct ElevenClient {
    http: reqwest::Client,
    config: ElevenConfig,
}

impl ElevenClient {
    pub fn new(http: reqwest::Client, config: ElevenConfig) -> Self {
        Self { http, config }
    }

    pub fn has_credentials(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn require_credentials(&self) -> Result<(), ProviderError> {
        if self.has_credentials() {
            Ok(())
        } else {
            Err(ProviderError::AuthMissing {
                provider: "elevenlabs",
            })
        }
    }

    /// List available voices.
    pub async fn voices(&self) -> Result<Vec<Voice>, ProviderError> {
        self.require_credentials()?;

        let response = self
            .http
            .get(format!("{}/voices", self.config.base_url))
            .header("xi-api-key", &self.config.api_key)
            .header("accept", "application/json")
            .send()
            .await?;

        let envelope: VoicesEnvelope = check_success(response).await?.json().await?;

        let voices = envelope
            .voices
            .into_iter()
            .filter_map(|raw| {
                let id = raw.voice_id.or(raw.id)?;
                Some(Voice {
                    id,
                    name: raw.name,
                    category: raw.category.unwrap_or_default(),
                })
            })
            .collect::<Vec<_>>();

        tracing::info!(count = voices.len(), "listed tts voices");
        Ok(voices)
    }

    /// Synthesize `text` with `voice_id` and return the full MP3 body.
    pub async fn synthesize(
        &self,
        voice_id: &str,
        text: &str,
        model_id: Option<&str>,
        settings: &VoiceSettings,
    ) -> Result<Vec<u8>, ProviderError> {
        let response = self.synthesize_stream(voice_id, text, model_id, settings).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Synthesize `text` and return the success-checked upstream response
    /// for streaming straight through to the caller.
    pub async fn synthesize_stream(
        &self,
        voice_id: &str,
        text: &str,
        model_id: Option<&str>,
        settings: &VoiceSettings,
    ) -> Result<reqwest::Response, ProviderError> {
        self.require_credentials()?;

        let body = SynthesisBody {
            text,
            model_id: model_id.unwrap_or(DEFAULT_TTS_MODEL),
            voice_settings: settings,
        };

        let response = self
            .http
            .post(format!(
                "{}/text-to-speech/{voice_id}?optimize_streaming_latency=0",
                self.config.base_url,
            ))
            .header("xi-api-key", &self.config.api_key)
            .header("accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        check_success(response).await
    }
}

/// Map a non-success response to [`ProviderError::Upstream`], keeping the
/// body text for diagnostics.
async fn check_success(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unreadable body>".to_string());
    Err(ProviderError::Upstream {
        status: status.as_u16(),
        body,
    })
}

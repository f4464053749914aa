//! Caller-supplied generation request model.

use serde::{Deserialize, Serialize};

/// Target model tier for a submission.
///
/// The tier selects which provider model identifier is used on the wire
/// (configured per deployment); it does not change the submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Cheaper, lower-latency model.
    Fast,
    /// Slower, higher-fidelity model.
    Quality,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Fast => "fast",
            ModelTier::Quality => "quality",
        }
    }
}

/// A video generation request as submitted by the caller.
///
/// Only `prompt` is meaningful on its own; everything else is optional and
/// forwarded to the provider when that provider accepts the field. Callers
/// send either snake_case or camelCase field names, so the multi-word
/// fields carry serde aliases.
///
/// Unknown fields are dropped at deserialization: each provider submission
/// enumerates exactly the fields that provider accepts, so there is no
/// pass-through channel for arbitrary extras.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: String,

    /// e.g. `"16:9"`.
    #[serde(default, alias = "aspectRatio")]
    pub aspect_ratio: Option<String>,

    /// Clip length in seconds.
    #[serde(default, alias = "durationSeconds", alias = "duration_seconds")]
    pub duration: Option<f64>,

    /// e.g. `"720p"` or `"1080p"`.
    #[serde(default)]
    pub resolution: Option<String>,

    /// Whether the provider should generate an audio track.
    #[serde(default, alias = "enableAudio", alias = "generate_audio")]
    pub audio: Option<bool>,

    #[serde(default)]
    pub seed: Option<i64>,

    #[serde(default, alias = "negativePrompt")]
    pub negative_prompt: Option<String>,

    #[serde(default)]
    pub style: Option<String>,

    /// Provider selector carried in the request body. The query parameter
    /// takes precedence; the configured default applies when neither is
    /// present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_snake_case_fields() {
        let req: GenerationRequest = serde_json::from_str(
            r#"{"prompt":"a fox","aspect_ratio":"16:9","negative_prompt":"blurry"}"#,
        )
        .unwrap();
        assert_eq!(req.prompt, "a fox");
        assert_eq!(req.aspect_ratio.as_deref(), Some("16:9"));
        assert_eq!(req.negative_prompt.as_deref(), Some("blurry"));
    }

    #[test]
    fn deserializes_camel_case_aliases() {
        let req: GenerationRequest = serde_json::from_str(
            r#"{"prompt":"a fox","aspectRatio":"9:16","negativePrompt":"text","enableAudio":true}"#,
        )
        .unwrap();
        assert_eq!(req.aspect_ratio.as_deref(), Some("9:16"));
        assert_eq!(req.negative_prompt.as_deref(), Some("text"));
        assert_eq!(req.audio, Some(true));
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let req: GenerationRequest =
            serde_json::from_str(r#"{"prompt":"p","definitely_not_a_field":42}"#).unwrap();
        assert_eq!(req.prompt, "p");
    }

    #[test]
    fn body_provider_selector_is_captured() {
        let req: GenerationRequest =
            serde_json::from_str(r#"{"prompt":"p","provider":"fal"}"#).unwrap();
        assert_eq!(req.provider.as_deref(), Some("fal"));
    }
}

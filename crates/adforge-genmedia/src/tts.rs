//! ElevenLabs text-to-speech client.
//!
//! Synchronous API: one POST returns the MPEG audio inline.

use std::time::Duration;

use serde::Serialize;

use crate::error::GenMediaError;

/// Production API base.
pub const ELEVENLABS_API_BASE: &str = "https://api.elevenlabs.io";

/// Default voice ("Rachel").
const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";

const MODEL_ID: &str = "eleven_monolingual_v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// Client for ElevenLabs speech synthesis.
pub struct ElevenLabsClient {
    api_key: String,
    base_url: String,
    voice_id: String,
    http: reqwest::Client,
}

impl ElevenLabsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenMediaError> {
        Self::with_base_url(api_key, ELEVENLABS_API_BASE)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenMediaError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GenMediaError::MissingApiKey);
        }
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            api_key,
            base_url: base_url.into(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            http,
        })
    }

    /// Synthesize narration audio. Returns the MPEG bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, GenMediaError> {
        let body = SynthesizeRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.5,
            },
        };

        let response = self
            .http
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.base_url, self.voice_id
            ))
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenMediaError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

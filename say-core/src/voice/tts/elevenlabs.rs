//! ElevenLabs text-to-speech implementation

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::provider::TextToSpeech;
use super::types::{AudioData, Model, Voice};

pub const DEFAULT_API_BASE: &str = "https://api.elevenlabs.io";

#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl ElevenLabsConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

pub struct ElevenLabs {
    config: ElevenLabsConfig,
    client: Client,
}

impl ElevenLabs {
    pub fn new(config: ElevenLabsConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Requests go out unauthenticated when no key is configured; the service
    /// decides whether that is acceptable.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header("xi-api-key", key),
            None => request,
        }
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<VoiceData>,
}

#[derive(Deserialize)]
struct VoiceData {
    voice_id: String,
    name: String,
    #[serde(default)]
    labels: Option<BTreeMap<String, String>>,
}

#[derive(Deserialize)]
struct ModelData {
    model_id: String,
}

async fn check_status(response: Response) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("ElevenLabs API error {status}: {body}");
    }
    Ok(response)
}

#[async_trait]
impl TextToSpeech for ElevenLabs {
    async fn list_voices(&self) -> Result<Vec<Voice>> {
        let response = self
            .authorize(self.client.get(self.url("/v1/voices")))
            .send()
            .await
            .context("Failed to list voices from ElevenLabs")?;
        let response = check_status(response).await?;

        let voices_response: VoicesResponse = response
            .json()
            .await
            .context("Failed to parse voices response")?;

        let voices = voices_response
            .voices
            .into_iter()
            .map(|v| Voice {
                voice_id: v.voice_id,
                name: v.name,
                labels: v.labels.unwrap_or_default(),
            })
            .collect();

        Ok(voices)
    }

    async fn list_models(&self) -> Result<Vec<Model>> {
        let response = self
            .authorize(self.client.get(self.url("/v1/models")))
            .send()
            .await
            .context("Failed to list models from ElevenLabs")?;
        let response = check_status(response).await?;

        let models: Vec<ModelData> = response
            .json()
            .await
            .context("Failed to parse models response")?;

        Ok(models
            .into_iter()
            .map(|m| Model::new(m.model_id))
            .collect())
    }

    async fn synthesize(&self, text: &str, voice: &Voice, model_id: &str) -> Result<AudioData> {
        let url = self.url(&format!("/v1/text-to-speech/{}", voice.voice_id));

        let request_body = SynthesizeRequest { text, model_id };

        let response = self
            .authorize(self.client.post(&url))
            .header("Accept", "audio/mpeg")
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to ElevenLabs")?;
        let response = check_status(response).await?;

        let bytes = response
            .bytes()
            .await
            .context("Failed to read audio bytes")?
            .to_vec();

        if bytes.is_empty() {
            anyhow::bail!("ElevenLabs returned no audio for voice {}", voice.name);
        }

        Ok(AudioData::new(bytes))
    }
}

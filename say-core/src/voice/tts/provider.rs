use anyhow::Result;
use async_trait::async_trait;

use super::types::{AudioData, Model, Voice};

/// Trait for text-to-speech providers
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// List available voices, in the order the service returns them
    async fn list_voices(&self) -> Result<Vec<Voice>>;

    /// List available models, newest first
    async fn list_models(&self) -> Result<Vec<Model>>;

    /// Synthesize text to speech audio
    async fn synthesize(&self, text: &str, voice: &Voice, model_id: &str) -> Result<AudioData>;
}

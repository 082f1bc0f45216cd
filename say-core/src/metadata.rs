//! Voice and model lists, read through the cache.
//!
//! Both lists are fetched from the service at most once per cache directory:
//! once stored they are reused forever, even if the service has changed.

use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::SayError;
use crate::voice::tts::provider::TextToSpeech;
use crate::voice::tts::types::{Model, Voice, DEFAULT_MODEL_ID};

pub struct MetadataFetcher<'a> {
    cache: &'a CacheStore,
    provider: &'a dyn TextToSpeech,
}

impl<'a> MetadataFetcher<'a> {
    pub fn new(cache: &'a CacheStore, provider: &'a dyn TextToSpeech) -> Self {
        Self { cache, provider }
    }

    /// The voice list. Without it nothing can be selected, so failures are fatal.
    pub async fn voices(&self) -> Result<Vec<Voice>, SayError> {
        if let Some(voices) = self.cache.load_voices().map_err(SayError::Cache)? {
            debug!(count = voices.len(), "Loading voices from cache");
            return Ok(voices);
        }

        debug!("Fetching voices from API");
        let voices = self
            .provider
            .list_voices()
            .await
            .map_err(SayError::VoiceFetch)?;
        self.cache.store_voices(&voices).map_err(SayError::Cache)?;

        Ok(voices)
    }

    /// The model list. A failed fetch is not cached so a later run can retry.
    pub async fn models(&self) -> Result<Vec<Model>, SayError> {
        if let Some(models) = self.cache.load_models().map_err(SayError::ModelFetch)? {
            debug!(count = models.len(), "Loading models from cache");
            return Ok(models);
        }

        debug!("Fetching models from API");
        let models = self
            .provider
            .list_models()
            .await
            .map_err(SayError::ModelFetch)?;
        if let Err(e) = self.cache.store_models(&models) {
            warn!(error = ?e, "Failed to cache model list");
        }

        Ok(models)
    }

    /// Id of the newest model, or [`DEFAULT_MODEL_ID`] when none is known
    pub async fn latest_model_id(&self) -> String {
        match self.models().await {
            Ok(models) => models
                .into_iter()
                .next()
                .map(|m| m.model_id)
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            Err(e) => {
                warn!(error = %e, "Using default model {DEFAULT_MODEL_ID}");
                DEFAULT_MODEL_ID.to_string()
            }
        }
    }
}

//! Speaks one (voice, text) pair: cached audio when available, otherwise a
//! fresh synthesis that is cached before it is played.

use tracing::{debug, warn};

use crate::cache::fingerprint::Fingerprint;
use crate::cache::{CacheKey, CacheStore};
use crate::error::SayError;
use crate::voice::audio::playback::Player;
use crate::voice::tts::provider::TextToSpeech;
use crate::voice::tts::types::{AudioData, Voice};

/// Where the played audio came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSource {
    Cache,
    Synthesized,
}

pub struct Speaker<'a> {
    cache: &'a CacheStore,
    provider: &'a dyn TextToSpeech,
    player: &'a dyn Player,
}

impl<'a> Speaker<'a> {
    pub fn new(
        cache: &'a CacheStore,
        provider: &'a dyn TextToSpeech,
        player: &'a dyn Player,
    ) -> Self {
        Self {
            cache,
            provider,
            player,
        }
    }

    /// Speak `text` with `voice`. Each distinct pair is synthesized at most
    /// once while its audio stays in the cache; nothing is retried.
    pub async fn speak(
        &self,
        text: &str,
        voice: &Voice,
        model_id: &str,
    ) -> Result<AudioSource, SayError> {
        let key = CacheKey::Audio(Fingerprint::new(&voice.name, text));

        let cached = self.cache.load(&key).unwrap_or_else(|e| {
            warn!(error = ?e, "Ignoring unreadable cached audio");
            None
        });

        if let Some(bytes) = cached {
            debug!(voice = %voice.name, path = ?self.cache.path(&key), "Playing audio from cache");
            return self.play_cached(&key, voice, AudioData::new(bytes)).await;
        }

        debug!(voice = %voice.name, model_id, "Generating and playing audio");
        let audio = self
            .provider
            .synthesize(text, voice, model_id)
            .await
            .map_err(|error| SayError::Synthesis {
                voice: voice.name.clone(),
                error,
            })?;

        if let Err(e) = self.cache.store(&key, &audio.bytes) {
            warn!(error = ?e, "Failed to cache synthesized audio");
        }

        self.player
            .play(&audio)
            .await
            .map_err(|error| SayError::Playback {
                voice: voice.name.clone(),
                error,
            })?;

        Ok(AudioSource::Synthesized)
    }

    /// A cached file that cannot be played is presumed corrupt and removed,
    /// so the next identical request synthesizes again.
    async fn play_cached(
        &self,
        key: &CacheKey,
        voice: &Voice,
        audio: AudioData,
    ) -> Result<AudioSource, SayError> {
        match self.player.play(&audio).await {
            Ok(()) => Ok(AudioSource::Cache),
            Err(error) => {
                match self.cache.remove(key) {
                    Ok(()) => debug!(path = ?self.cache.path(key), "Removed unplayable cached audio"),
                    Err(e) => warn!(error = ?e, "Failed to remove unplayable cached audio"),
                }
                Err(SayError::Playback {
                    voice: voice.name.clone(),
                    error,
                })
            }
        }
    }
}

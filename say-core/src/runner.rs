use rand::Rng;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::error::SayError;
use crate::metadata::MetadataFetcher;
use crate::selector::{select, VoiceRequest};
use crate::speaker::{AudioSource, Speaker};
use crate::voice::audio::playback::Player;
use crate::voice::tts::provider::TextToSpeech;
use crate::voice::tts::types::Voice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub text: String,
    pub voice: VoiceRequest,
}

impl Request {
    /// Words are joined with single spaces
    pub fn new<S: AsRef<str>>(words: &[S], voice: VoiceRequest) -> Self {
        let text = words
            .iter()
            .map(|w| w.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        Self { text, voice }
    }
}

#[derive(Debug)]
pub struct VoiceOutcome {
    pub voice: String,
    pub result: Result<AudioSource, SayError>,
}

/// Per-voice outcomes of one run, in the order the voices were attempted
#[derive(Debug, Default)]
pub struct RunReport {
    pub model_id: String,
    pub outcomes: Vec<VoiceOutcome>,
}

impl RunReport {
    /// A run succeeds when the last voice attempted succeeded. With `All`
    /// earlier failures are reported but do not change the result.
    pub fn succeeded(&self) -> bool {
        self.outcomes
            .last()
            .is_some_and(|outcome| outcome.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &VoiceOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Process exit status for a finished run: 0 on success, 1 otherwise
pub fn exit_code(result: &Result<RunReport, SayError>) -> u8 {
    match result {
        Ok(report) if report.succeeded() => 0,
        _ => 1,
    }
}

/// Drives a request from voice selection through playback
pub struct Runner {
    cache: CacheStore,
    provider: Arc<dyn TextToSpeech>,
    player: Arc<dyn Player>,
    default_voice: String,
}

impl Runner {
    pub fn new(
        cache: CacheStore,
        provider: Arc<dyn TextToSpeech>,
        player: Arc<dyn Player>,
        default_voice: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            provider,
            player,
            default_voice: default_voice.into(),
        }
    }

    fn metadata(&self) -> MetadataFetcher<'_> {
        MetadataFetcher::new(&self.cache, self.provider.as_ref())
    }

    /// Known voices, from the cache or the service
    pub async fn voices(&self) -> Result<Vec<Voice>, SayError> {
        self.metadata().voices().await
    }

    pub async fn run<R: Rng + ?Sized>(
        &self,
        request: &Request,
        rng: &mut R,
    ) -> Result<RunReport, SayError> {
        let voices = self.voices().await?;
        self.run_with_voices(request, &voices, rng).await
    }

    /// Run against an already loaded voice list. `Err` is returned only for
    /// fatal errors; per-voice failures are collected in the report.
    pub async fn run_with_voices<R: Rng + ?Sized>(
        &self,
        request: &Request,
        voices: &[Voice],
        rng: &mut R,
    ) -> Result<RunReport, SayError> {
        let selected = select(&request.voice, voices, &self.default_voice, rng)?;
        let model_id = self.metadata().latest_model_id().await;
        debug!(request = %request.voice, model_id = %model_id, count = selected.len(), "Speaking");

        let speaker = Speaker::new(&self.cache, self.provider.as_ref(), self.player.as_ref());
        let mut outcomes = Vec::with_capacity(selected.len());
        for voice in &selected {
            debug!(voice = %voice.name, "Speaking with voice");
            let result = speaker.speak(&request.text, voice, &model_id).await;
            if let Err(e) = &result {
                warn!(error = %e, "Voice failed");
            }
            outcomes.push(VoiceOutcome {
                voice: voice.name.clone(),
                result,
            });
        }

        Ok(RunReport { model_id, outcomes })
    }
}

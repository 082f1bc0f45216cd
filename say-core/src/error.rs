use thiserror::Error;

/// Failures that can occur while turning text into played audio.
///
/// `VoiceFetch`, `Configuration` and `Cache` abort a run. `ModelFetch` is
/// absorbed by the metadata fetcher, while `Synthesis` and `Playback` are
/// reported per voice.
#[derive(Error, Debug)]
pub enum SayError {
    #[error("Failed to fetch voices: {0:#}")]
    VoiceFetch(anyhow::Error),

    #[error("Failed to fetch models: {0:#}")]
    ModelFetch(anyhow::Error),

    #[error("Synthesis failed for voice {voice}: {error:#}")]
    Synthesis {
        voice: String,
        error: anyhow::Error,
    },

    #[error("Playback failed for voice {voice}: {error:#}")]
    Playback {
        voice: String,
        error: anyhow::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cache error: {0:#}")]
    Cache(anyhow::Error),
}

pub mod cache;
pub mod error;
pub mod metadata;
pub mod runner;
pub mod selector;
pub mod settings;
pub mod speaker;
pub mod voice;

pub use cache::CacheStore;
pub use error::SayError;
pub use runner::{Request, RunReport, Runner};
pub use selector::VoiceRequest;
pub use settings::{Config, Settings};
pub use voice::audio::playback::Player;
pub use voice::tts::provider::TextToSpeech;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::provider::TextToSpeech;
use super::types::{AudioData, Model, Voice};

/// Mock behavior for one endpoint of the mock provider
#[derive(Debug, Clone, Default)]
pub enum MockBehavior {
    /// Return successful responses
    #[default]
    Success,
    /// Always return an error
    AlwaysError,
    /// Play the queued behaviors in order, then succeed
    BehaviorQueue { behaviors: Vec<MockBehavior> },
}

impl MockBehavior {
    fn next(&mut self) -> MockBehavior {
        if let MockBehavior::BehaviorQueue { behaviors } = self {
            if behaviors.is_empty() {
                return MockBehavior::Success;
            }
            return behaviors.remove(0);
        }
        self.clone()
    }
}

/// A captured synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisCall {
    pub text: String,
    pub voice: String,
    pub model_id: String,
}

#[derive(Default)]
struct MockState {
    voices: Vec<Voice>,
    models: Vec<Model>,
    voices_behavior: MockBehavior,
    models_behavior: MockBehavior,
    synthesis_behavior: MockBehavior,
    voice_list_calls: usize,
    model_list_calls: usize,
    synthesis_calls: Vec<SynthesisCall>,
}

/// Mock text-to-speech service for testing. Synthesized audio is the bytes of
/// `"audio:<voice>:<text>"` so tests can tell payloads apart.
#[derive(Clone, Default)]
pub struct MockTextToSpeech {
    state: Arc<Mutex<MockState>>,
}

impl MockTextToSpeech {
    pub fn new(voices: Vec<Voice>, models: Vec<Model>) -> Self {
        let mock = Self::default();
        {
            let mut state = mock.state.lock().unwrap();
            state.voices = voices;
            state.models = models;
        }
        mock
    }

    pub fn audio_for(voice: &str, text: &str) -> Vec<u8> {
        format!("audio:{voice}:{text}").into_bytes()
    }

    pub fn set_voices(&self, voices: Vec<Voice>) {
        self.state.lock().unwrap().voices = voices;
    }

    pub fn set_models(&self, models: Vec<Model>) {
        self.state.lock().unwrap().models = models;
    }

    pub fn set_voices_behavior(&self, behavior: MockBehavior) {
        self.state.lock().unwrap().voices_behavior = behavior;
    }

    pub fn set_models_behavior(&self, behavior: MockBehavior) {
        self.state.lock().unwrap().models_behavior = behavior;
    }

    pub fn set_synthesis_behavior(&self, behavior: MockBehavior) {
        self.state.lock().unwrap().synthesis_behavior = behavior;
    }

    pub fn voice_list_calls(&self) -> usize {
        self.state.lock().unwrap().voice_list_calls
    }

    pub fn model_list_calls(&self) -> usize {
        self.state.lock().unwrap().model_list_calls
    }

    pub fn synthesis_calls(&self) -> Vec<SynthesisCall> {
        self.state.lock().unwrap().synthesis_calls.clone()
    }
}

#[async_trait]
impl TextToSpeech for MockTextToSpeech {
    async fn list_voices(&self) -> Result<Vec<Voice>> {
        let mut state = self.state.lock().unwrap();
        state.voice_list_calls += 1;
        match state.voices_behavior.next() {
            MockBehavior::AlwaysError => Err(anyhow::anyhow!("Mock voice list error")),
            _ => Ok(state.voices.clone()),
        }
    }

    async fn list_models(&self) -> Result<Vec<Model>> {
        let mut state = self.state.lock().unwrap();
        state.model_list_calls += 1;
        match state.models_behavior.next() {
            MockBehavior::AlwaysError => Err(anyhow::anyhow!("Mock model list error")),
            _ => Ok(state.models.clone()),
        }
    }

    async fn synthesize(&self, text: &str, voice: &Voice, model_id: &str) -> Result<AudioData> {
        let mut state = self.state.lock().unwrap();
        state.synthesis_calls.push(SynthesisCall {
            text: text.to_string(),
            voice: voice.name.clone(),
            model_id: model_id.to_string(),
        });
        match state.synthesis_behavior.next() {
            MockBehavior::AlwaysError => Err(anyhow::anyhow!(
                "Mock synthesis error for voice {}",
                voice.name
            )),
            _ => Ok(AudioData::new(Self::audio_for(&voice.name, text))),
        }
    }
}

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::playback::Player;
use crate::voice::tts::types::AudioData;

#[derive(Default)]
struct MockPlayerState {
    played: Vec<Vec<u8>>,
    rejected: HashSet<Vec<u8>>,
    always_fail: bool,
}

/// Mock player for testing. Records every payload it is asked to play and
/// fails on payloads registered with [`MockPlayer::reject`].
#[derive(Clone, Default)]
pub struct MockPlayer {
    state: Arc<Mutex<MockPlayerState>>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat this payload as undecodable
    pub fn reject(&self, bytes: impl Into<Vec<u8>>) {
        self.state.lock().unwrap().rejected.insert(bytes.into());
    }

    pub fn set_always_fail(&self, always_fail: bool) {
        self.state.lock().unwrap().always_fail = always_fail;
    }

    /// Payloads passed to `play`, including the ones that failed
    pub fn played(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().played.clone()
    }
}

#[async_trait]
impl Player for MockPlayer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn play(&self, audio: &AudioData) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.played.push(audio.bytes.clone());
        if state.always_fail || state.rejected.contains(&audio.bytes) {
            anyhow::bail!("Mock playback error: could not decode audio");
        }
        Ok(())
    }
}

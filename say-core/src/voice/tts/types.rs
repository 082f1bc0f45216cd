use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model used when the model list is unavailable or empty.
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

/// Encoded audio returned from synthesis (MP3 for ElevenLabs)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    pub bytes: Vec<u8>,
}

impl AudioData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

/// A named synthetic speaker. Users address voices by `name`; the remote
/// synthesis endpoint addresses them by `voice_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl Voice {
    pub fn new(voice_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            name: name.into(),
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn gender(&self) -> Option<&str> {
        self.labels.get("gender").map(String::as_str)
    }
}

/// A remote synthesis engine version
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    pub model_id: String,
}

impl Model {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

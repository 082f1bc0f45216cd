//! On-disk schema for the cached voice and model lists

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::voice::tts::types::{Model, Voice};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoiceListRecord {
    pub version: u32,
    pub voices: Vec<Voice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelListRecord {
    pub version: u32,
    pub models: Vec<Model>,
}

impl VoiceListRecord {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            voices,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("failed to serialize voice list")
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let record: Self =
            serde_json::from_slice(bytes).context("failed to deserialize voice list")?;
        check_version(record.version)?;
        Ok(record)
    }
}

impl ModelListRecord {
    pub fn new(models: Vec<Model>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            models,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(self).context("failed to serialize model list")
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let record: Self =
            serde_json::from_slice(bytes).context("failed to deserialize model list")?;
        check_version(record.version)?;
        Ok(record)
    }
}

fn check_version(version: u32) -> Result<()> {
    if version != SCHEMA_VERSION {
        anyhow::bail!("unsupported cache schema version {version} (expected {SCHEMA_VERSION})");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_record_layout() {
        let record = VoiceListRecord::new(vec![
            Voice::new("r1", "Rachel").with_label("gender", "female")
        ]);
        let json: serde_json::Value = serde_json::from_slice(&record.encode().unwrap()).unwrap();

        assert_eq!(json["version"], 1);
        assert_eq!(json["voices"][0]["name"], "Rachel");
        assert_eq!(json["voices"][0]["voice_id"], "r1");
        assert_eq!(json["voices"][0]["labels"]["gender"], "female");
    }

    #[test]
    fn test_voice_without_labels_decodes() {
        let bytes = br#"{"version":1,"voices":[{"voice_id":"b1","name":"Bella"}]}"#;
        let record = VoiceListRecord::decode(bytes).unwrap();
        assert_eq!(record.voices, vec![Voice::new("b1", "Bella")]);
    }

    #[test]
    fn test_future_version_is_rejected() {
        let bytes = br#"{"version":2,"models":[{"model_id":"eleven_v2"}]}"#;
        let err = ModelListRecord::decode(bytes).unwrap_err();
        assert!(err.to_string().contains("unsupported cache schema version 2"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(VoiceListRecord::decode(b"\x80\x04\x95pickle").is_err());
        assert!(ModelListRecord::decode(b"").is_err());
    }
}

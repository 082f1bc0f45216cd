//! Directory-backed cache for the voice list, the model list and synthesized
//! audio. Entries never expire; a stale or corrupt entry stays until it is
//! removed explicitly or the directory is cleared by hand.

pub mod fingerprint;
pub mod records;

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::voice::tts::types::{Model, Voice};
use fingerprint::Fingerprint;
use records::{ModelListRecord, VoiceListRecord};

const VOICES_FILE: &str = "voices.json";
const MODELS_FILE: &str = "models.json";
const AUDIO_DIR: &str = "audio";
const AUDIO_EXTENSION: &str = "mp3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey {
    Voices,
    Models,
    Audio(Fingerprint),
}

#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open the cache rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create cache directory {root:?}"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, key: &CacheKey) -> PathBuf {
        match key {
            CacheKey::Voices => self.root.join(VOICES_FILE),
            CacheKey::Models => self.root.join(MODELS_FILE),
            CacheKey::Audio(fingerprint) => self
                .root
                .join(AUDIO_DIR)
                .join(format!("{fingerprint}.{AUDIO_EXTENSION}")),
        }
    }

    /// Raw bytes stored under `key`, or `None` when nothing is stored
    pub fn load(&self, key: &CacheKey) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read cache entry {path:?}")),
        }
    }

    pub fn store(&self, key: &CacheKey, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
        fs::write(&path, bytes).with_context(|| format!("failed to write cache entry {path:?}"))
    }

    /// Remove the entry under `key`. Removing a missing entry is not an error.
    pub fn remove(&self, key: &CacheKey) -> Result<()> {
        let path = self.path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to remove cache entry {path:?}")),
        }
    }

    pub fn load_voices(&self) -> Result<Option<Vec<Voice>>> {
        self.load(&CacheKey::Voices)?
            .map(|bytes| VoiceListRecord::decode(&bytes).map(|record| record.voices))
            .transpose()
    }

    pub fn store_voices(&self, voices: &[Voice]) -> Result<()> {
        let bytes = VoiceListRecord::new(voices.to_vec()).encode()?;
        self.store(&CacheKey::Voices, &bytes)
    }

    pub fn load_models(&self) -> Result<Option<Vec<Model>>> {
        self.load(&CacheKey::Models)?
            .map(|bytes| ModelListRecord::decode(&bytes).map(|record| record.models))
            .transpose()
    }

    pub fn store_models(&self, models: &[Model]) -> Result<()> {
        let bytes = ModelListRecord::new(models.to_vec()).encode()?;
        self.store(&CacheKey::Models, &bytes)
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SayError;

/// Optional settings file (`~/.config/say/settings.toml` by default). Every
/// key may be omitted; environment variables take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub cache_dir: Option<PathBuf>,
    pub default_voice: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
}

impl Settings {
    /// Get the default settings path (<config dir>/say/settings.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("say").join("settings.toml"))
    }

    /// Load settings from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SayError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(SayError::Configuration(format!(
                    "failed to read settings from {path:?}: {e}"
                )))
            }
        };

        toml::from_str(&contents).map_err(|e| {
            SayError::Configuration(format!("failed to parse settings {path:?}: {e}"))
        })
    }
}

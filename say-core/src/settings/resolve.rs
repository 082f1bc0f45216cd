use std::fmt;
use std::path::PathBuf;

use super::config::Settings;
use crate::voice::tts::elevenlabs::DEFAULT_API_BASE;

pub const DEFAULT_VOICE: &str = "Rachel";

/// Subdirectory of the user cache directory holding all cached state
pub const CACHE_SUBDIR: &str = "elevenlabs";

pub const ENV_CACHE_DIR: &str = "ELEVENLABS_CACHE_DIR";
pub const ENV_DEFAULT_VOICE: &str = "ELEVENLABS_DEFAULT_VOICE";
pub const ENV_API_KEY: &str = "ELEVEN_API_KEY";
pub const ENV_API_KEY_ALT: &str = "ELEVENLABS_API_KEY";
pub const ENV_API_BASE: &str = "ELEVENLABS_API_BASE";

/// Runtime configuration, resolved once at startup and passed down
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub cache_dir: PathBuf,
    pub default_voice: String,
    pub api_key: Option<String>,
    pub api_base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("cache_dir", &self.cache_dir)
            .field("default_voice", &self.default_voice)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

impl Config {
    /// Resolve against the process environment
    pub fn from_env(settings: Settings) -> Self {
        Self::resolve(settings, |key| std::env::var(key).ok())
    }

    /// Precedence: environment, then settings file, then defaults. Empty
    /// environment values count as unset.
    pub fn resolve<F>(settings: Settings, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let cache_dir = var(ENV_CACHE_DIR)
            .map(PathBuf::from)
            .or(settings.cache_dir)
            .unwrap_or_else(|| default_cache_root(var("XDG_CACHE_HOME")).join(CACHE_SUBDIR));

        let default_voice = var(ENV_DEFAULT_VOICE)
            .or(settings.default_voice)
            .unwrap_or_else(|| DEFAULT_VOICE.to_string());

        let api_key = var(ENV_API_KEY)
            .or_else(|| var(ENV_API_KEY_ALT))
            .or(settings.api_key);

        let api_base_url = var(ENV_API_BASE)
            .or(settings.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Self {
            cache_dir,
            default_voice,
            api_key,
            api_base_url,
        }
    }
}

fn default_cache_root(xdg_cache_home: Option<String>) -> PathBuf {
    if let Some(dir) = xdg_cache_home {
        return PathBuf::from(dir);
    }
    dirs::cache_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
        .unwrap_or_else(|| PathBuf::from(".cache"))
}

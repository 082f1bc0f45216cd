//! Resolves the user's `--voice` argument into concrete voices.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use tracing::debug;

use crate::error::SayError;
use crate::voice::tts::types::Voice;

/// Selection tokens accepted in addition to voice names. `Random` is the
/// older spelling of `Any`.
pub const SELECTION_TOKENS: [&str; 5] = ["All", "Any", "Male", "Female", "Random"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceRequest {
    /// Every known voice, one after another
    All,
    /// One voice at random
    Any,
    /// One voice at random among those labelled with this gender
    Gender(Gender),
    /// A specific voice by name
    Named(String),
    /// The configured default voice
    Default,
}

impl VoiceRequest {
    /// Interpret a `--voice` argument. Selection tokens win over voice names.
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            None => VoiceRequest::Default,
            Some("All") => VoiceRequest::All,
            Some("Any") | Some("Random") => VoiceRequest::Any,
            Some("Male") => VoiceRequest::Gender(Gender::Male),
            Some("Female") => VoiceRequest::Gender(Gender::Female),
            Some(name) => VoiceRequest::Named(name.to_string()),
        }
    }

    /// Every value `--voice` accepts given the known voices
    pub fn choices(voices: &[Voice]) -> Vec<String> {
        voices
            .iter()
            .map(|v| v.name.clone())
            .chain(SELECTION_TOKENS.iter().map(|t| t.to_string()))
            .collect()
    }

    /// Parse and check a `--voice` argument against the known voices
    pub fn validate(token: Option<&str>, voices: &[Voice]) -> Result<Self, InvalidVoice> {
        let request = Self::parse(token);
        if let VoiceRequest::Named(name) = &request {
            if !voices.iter().any(|v| &v.name == name) {
                return Err(InvalidVoice {
                    name: name.clone(),
                    choices: Self::choices(voices),
                });
            }
        }
        Ok(request)
    }
}

impl fmt::Display for VoiceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceRequest::All => f.write_str("All"),
            VoiceRequest::Any => f.write_str("Any"),
            VoiceRequest::Gender(Gender::Male) => f.write_str("Male"),
            VoiceRequest::Gender(Gender::Female) => f.write_str("Female"),
            VoiceRequest::Named(name) => f.write_str(name),
            VoiceRequest::Default => f.write_str("default"),
        }
    }
}

/// A `--voice` value that names no known voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVoice {
    pub name: String,
    pub choices: Vec<String>,
}

impl fmt::Display for InvalidVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid value '{}' for voice (choose from {})",
            self.name,
            self.choices
                .iter()
                .map(|c| format!("'{c}'"))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for InvalidVoice {}

/// Resolve a request into the voices to speak with, in the order they should
/// be attempted. Only `All` yields more than one voice.
pub fn select<R: Rng + ?Sized>(
    request: &VoiceRequest,
    voices: &[Voice],
    default_voice: &str,
    rng: &mut R,
) -> Result<Vec<Voice>, SayError> {
    match request {
        VoiceRequest::All => {
            if voices.is_empty() {
                return Err(SayError::Configuration(
                    "no voices available to speak with".to_string(),
                ));
            }
            Ok(voices.to_vec())
        }
        VoiceRequest::Any => {
            let voice = voices.choose(rng).ok_or_else(|| {
                SayError::Configuration("no voices available to pick from".to_string())
            })?;
            debug!(voice = %voice.name, "Picking random voice");
            Ok(vec![voice.clone()])
        }
        VoiceRequest::Gender(gender) => {
            let candidates: Vec<&Voice> = voices
                .iter()
                .filter(|v| {
                    v.gender()
                        .is_some_and(|g| g.eq_ignore_ascii_case(gender.label()))
                })
                .collect();
            let voice = candidates.choose(rng).ok_or_else(|| {
                SayError::Configuration(format!("no {} voices available", gender.label()))
            })?;
            debug!(voice = %voice.name, gender = gender.label(), "Picking random voice");
            Ok(vec![(*voice).clone()])
        }
        VoiceRequest::Named(name) => find(voices, name).map(|v| vec![v]),
        VoiceRequest::Default => {
            debug!(voice = default_voice, "Using default voice");
            find(voices, default_voice).map(|v| vec![v])
        }
    }
}

fn find(voices: &[Voice], name: &str) -> Result<Voice, SayError> {
    voices
        .iter()
        .find(|v| v.name == name)
        .cloned()
        .ok_or_else(|| SayError::Configuration(format!("unknown voice '{name}'")))
}

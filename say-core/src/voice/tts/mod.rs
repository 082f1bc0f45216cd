//! Remote text-to-speech service

pub mod elevenlabs;
pub mod mock;
pub mod provider;
pub mod types;

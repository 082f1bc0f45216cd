//! Audio playback for synthesized speech

pub mod mock;
pub mod playback;

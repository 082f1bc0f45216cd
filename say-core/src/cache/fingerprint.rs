use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of a cached audio artifact: SHA-256 of `"<voice>:<text>"`,
/// rendered as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(voice: &str, text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(voice.as_bytes());
        hasher.update(b":");
        hasher.update(text.as_bytes());
        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

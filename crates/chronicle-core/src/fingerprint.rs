//! Content fingerprints for change detection
//!
//! A fingerprint is the first 8 bytes of the SHA-256 digest of the text,
//! hex-encoded. It only signals "this text changed"; it is not a security
//! primitive.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in a fingerprint.
const FINGERPRINT_BYTES: usize = 8;

/// Fixed-size token identifying a text blob.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint the exact bytes of `text`.
    pub fn of(text: &str) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        Fingerprint(hex::encode(&digest[..FINGERPRINT_BYTES]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convenience wrapper around [`Fingerprint::of`].
pub fn fingerprint(text: &str) -> Fingerprint {
    Fingerprint::of(text)
}

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Identifies one harness session in logs and failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct RunId(pub Uuid);

impl RunId {
    /// Creates a new random `RunId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A SHA-256 digest of a generated data buffer.
///
/// Lets a failure report identify the exact `data` file the tool searched
/// without embedding up to a megabyte of bytes in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Creates a `ContentHash` from a raw 32-byte array.
    #[must_use]
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Hashes `bytes` with SHA-256.
    ///
    /// # Complexity
    /// O(n) in the length of `bytes`.
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_of_empty_is_sha256_of_empty() {
        let hash = ContentHash::of(b"");
        assert_eq!(
            hash.to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            "empty input hash must match known SHA-256 value"
        );
    }

    #[test]
    fn content_hash_display_shows_lowercase_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xde;
        bytes[1] = 0xad;
        bytes[31] = 0xff;
        let s = ContentHash::new(bytes).to_string();
        assert!(s.starts_with("dead"), "expected hex starting with 'dead', got {s}");
        assert!(s.ends_with("ff"), "expected hex ending with 'ff', got {s}");
        assert_eq!(s.len(), 64);
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new(), "two fresh run ids must differ");
    }
}

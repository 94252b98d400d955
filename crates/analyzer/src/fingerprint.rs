//! Content fingerprints.
//!
//! A fingerprint is the lowercase hex SHA-256 digest of a document's UTF-8
//! bytes. Two documents are treated as the same content exactly when their
//! fingerprints are equal.
//!
//! # Empty input
//!
//! Empty text fingerprints to the empty string, not to the digest of zero
//! bytes. Every empty document therefore shares one fingerprint, and the
//! registry classifies later empty documents as duplicates of the first.
//!
//! ```rust
//! use analyzer::compute_fingerprint;
//!
//! let fp = compute_fingerprint("hello world");
//! assert_eq!(fp.as_str().len(), 64);
//! assert!(compute_fingerprint("").is_empty());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex length of a non-empty fingerprint.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Content-addressed identity of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The hex digest, or `""` for empty content.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the fingerprint of empty content.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fingerprint `text`: `SHA-256(utf8_bytes)` as lowercase hex.
pub fn compute_fingerprint(text: &str) -> Fingerprint {
    if text.is_empty() {
        return Fingerprint::default();
    }
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Fingerprint(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        let fp = compute_fingerprint("hello world");
        assert_eq!(
            fp.as_str(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn empty_text_is_empty_fingerprint() {
        let fp = compute_fingerprint("");
        assert!(fp.is_empty());
        assert_eq!(fp.as_str(), "");
    }

    #[test]
    fn whitespace_is_content() {
        let fp = compute_fingerprint(" ");
        assert_eq!(fp.as_str().len(), FINGERPRINT_HEX_LEN);
        assert_ne!(fp, compute_fingerprint("  "));
    }

    #[test]
    fn lowercase_hex_only() {
        let fp = compute_fingerprint("Some Document Text");
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn short_prefix_handles_empty() {
        assert_eq!(Fingerprint::default().short(), "");
        assert_eq!(compute_fingerprint("x").short().len(), 12);
    }

    #[test]
    fn serializes_as_plain_string() {
        let fp = compute_fingerprint("abc");
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{}\"", fp.as_str()));
    }
}

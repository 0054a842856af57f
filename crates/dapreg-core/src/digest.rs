//! # Content Digests
//!
//! Defines [`ContentDigest`] and the single digest computation path,
//! [`sha256_digest`].
//!
//! ## Security Invariant
//!
//! `sha256_digest` accepts `&CanonicalBytes` — not raw `&[u8]`. Every
//! digest in the system was therefore computed from properly
//! canonicalized data.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// A 32-byte SHA-256 digest of canonical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// The input must be [`CanonicalBytes`] — raw byte slices are not
/// accepted.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    ContentDigest(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_is_32_bytes_and_64_hex_chars() {
        let cb = CanonicalBytes::new(&json!({"key": "value"})).unwrap();
        let digest = sha256_digest(&cb);
        assert_eq!(digest.as_bytes().len(), 32);
        assert_eq!(digest.to_hex().len(), 64);
        assert!(digest.to_hex().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_deterministic() {
        let cb = CanonicalBytes::new(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(sha256_digest(&cb), sha256_digest(&cb));
    }

    #[test]
    fn key_order_does_not_change_digest() {
        let a = CanonicalBytes::new(&json!({"a": 1, "b": 2})).unwrap();
        let b = CanonicalBytes::new(&json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(sha256_digest(&a), sha256_digest(&b));
    }

    #[test]
    fn different_values_produce_different_digests() {
        let a = CanonicalBytes::new(&json!({"x": 1})).unwrap();
        let b = CanonicalBytes::new(&json!({"x": 2})).unwrap();
        assert_ne!(sha256_digest(&a), sha256_digest(&b));
    }

    #[test]
    fn known_vector_pin() {
        // sha256 of `{"hello":"world"}`.
        let cb = CanonicalBytes::new(&json!({"hello": "world"})).unwrap();
        assert_eq!(
            sha256_digest(&cb).to_hex(),
            "93a23971a914e5eacbf0a8d25154cda309c3c1c72fbb9914d47c60f3cb681588"
        );
    }

    #[test]
    fn display_renders_hex() {
        let digest = ContentDigest::from_bytes([0xab; 32]);
        assert_eq!(format!("{digest}"), "ab".repeat(32));
    }
}

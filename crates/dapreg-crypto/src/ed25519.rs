//! # Ed25519 Key Wrappers
//!
//! Crate-local wrappers over `ed25519-dalek` for signing and
//! verification.
//!
//! ## Security Invariants
//!
//! - Private keys are never serialized or logged. [`Ed25519KeyPair`]
//!   does not implement `Serialize` and its `Debug` output is redacted.
//! - Public keys serialize as hex-encoded strings.

use ed25519_dalek::{Signer as _, Verifier as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SignatureError;

/// An Ed25519 public key (32 bytes) for signature verification.
///
/// Serializes as a 64-character lowercase hex string.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; 32]);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519Signature([u8; 64]);

/// An Ed25519 key pair for signing operations.
///
/// Does not implement `Serialize` — private keys must not be
/// accidentally written into logs, responses, or artifacts.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Create a public key from raw 32 bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The raw 32-byte public key.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the public key as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Parse a public key from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self, SignatureError> {
        let bytes = hex_to_bytes(hex.trim())
            .map_err(SignatureError::InvalidKeyMaterial)?;
        let arr: [u8; 32] = bytes.try_into().map_err(|v: Vec<u8>| {
            SignatureError::InvalidKeyMaterial(format!(
                "public key must be 32 bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(arr))
    }

    /// Verify a signature over `data` with this key.
    ///
    /// Returns [`SignatureError::IntegrityMismatch`] when the signature
    /// does not check out, or when the key bytes are not a valid
    /// curve point.
    pub fn verify(&self, data: &[u8], signature: &Ed25519Signature) -> Result<(), SignatureError> {
        let vk = ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|_| SignatureError::IntegrityMismatch)?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        vk.verify(data, &sig)
            .map_err(|_| SignatureError::IntegrityMismatch)
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex_prefix(&self.0))
    }
}

impl std::fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// Create a signature from raw 64 bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Create a signature from a byte slice, checking length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SignatureError> {
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| SignatureError::IntegrityMismatch)?;
        Ok(Self(arr))
    }

    /// The raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex_prefix(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a new random key pair from the OS CSPRNG.
    pub fn generate() -> Self {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut rand_core::OsRng);
        Self { signing_key }
    }

    /// Create a key pair from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The public half of this key pair.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign arbitrary bytes with the private key.
    pub fn sign(&self, data: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(data).to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

// ---------------------------------------------------------------------------
// Hex utilities (no external hex crate dependency)
// ---------------------------------------------------------------------------

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| format!("invalid hex at position {i}: {e}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_generation_yields_32_byte_public_key() {
        let kp = Ed25519KeyPair::generate();
        assert_eq!(kp.public_key().as_bytes().len(), 32);
    }

    #[test]
    fn sign_verify_roundtrip() {
        let kp = Ed25519KeyPair::generate();
        let sig = kp.sign(b"registration payload");
        assert!(kp.public_key().verify(b"registration payload", &sig).is_ok());
    }

    #[test]
    fn verify_rejects_tampered_data() {
        let kp = Ed25519KeyPair::generate();
        let sig = kp.sign(b"original");
        assert!(matches!(
            kp.public_key().verify(b"tampered", &sig),
            Err(SignatureError::IntegrityMismatch)
        ));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let kp = Ed25519KeyPair::generate();
        let other = Ed25519KeyPair::generate();
        let sig = kp.sign(b"data");
        assert!(other.public_key().verify(b"data", &sig).is_err());
    }

    #[test]
    fn from_seed_is_deterministic() {
        let a = Ed25519KeyPair::from_seed(&[7u8; 32]);
        let b = Ed25519KeyPair::from_seed(&[7u8; 32]);
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn public_key_hex_roundtrip() {
        let pk = Ed25519KeyPair::generate().public_key();
        let back = Ed25519PublicKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(back, pk);
    }

    #[test]
    fn public_key_from_hex_rejects_wrong_length() {
        assert!(Ed25519PublicKey::from_hex("abcd").is_err());
    }

    #[test]
    fn signature_from_slice_checks_length() {
        assert!(Ed25519Signature::from_slice(&[0u8; 63]).is_err());
        assert!(Ed25519Signature::from_slice(&[0u8; 64]).is_ok());
    }

    #[test]
    fn keypair_debug_is_redacted() {
        let kp = Ed25519KeyPair::generate();
        assert_eq!(format!("{kp:?}"), "Ed25519KeyPair(<private>)");
    }

    #[test]
    fn public_key_serde_roundtrip() {
        let pk = Ed25519KeyPair::generate().public_key();
        let json = serde_json::to_string(&pk).unwrap();
        let back: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pk);
    }
}

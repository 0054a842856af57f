//! # Signer Capability
//!
//! Abstracts private-key custody behind a narrow trait. The compact
//! signature codec delegates "sign these bytes" to a [`Signer`] and
//! receives raw signature bytes back — it never holds private key
//! material itself.

use crate::ed25519::Ed25519KeyPair;
use crate::error::SignatureError;

/// The JWS algorithm identifier for Ed25519 signatures.
pub const ALG_EDDSA: &str = "EdDSA";

/// Trait for signature-producing backends.
///
/// Implementations must be `Send + Sync` so independent records can be
/// signed concurrently. Key custody is exclusively the implementation's
/// responsibility; callers only see signature bytes.
pub trait Signer: Send + Sync {
    /// The JWS algorithm identifier this signer produces (e.g. `EdDSA`).
    fn algorithm(&self) -> &str;

    /// The key identifier embedded in signature headers, conventionally
    /// `<did>#<fragment>`.
    fn key_id(&self) -> &str;

    /// Produce raw signature bytes over `data`.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignatureError>;
}

/// In-process Ed25519 signer for development, testing, and deployments
/// that hold their own keys.
pub struct Ed25519Signer {
    key: Ed25519KeyPair,
    key_id: String,
}

impl Ed25519Signer {
    /// Create a signer from an existing key pair and its key identifier.
    pub fn new(key: Ed25519KeyPair, key_id: impl Into<String>) -> Self {
        Self {
            key,
            key_id: key_id.into(),
        }
    }

    /// Generate a fresh random signer with the given key identifier.
    pub fn generate(key_id: impl Into<String>) -> Self {
        Self::new(Ed25519KeyPair::generate(), key_id)
    }

    /// The public half of the signing key.
    pub fn public_key(&self) -> crate::ed25519::Ed25519PublicKey {
        self.key.public_key()
    }
}

impl Signer for Ed25519Signer {
    fn algorithm(&self) -> &str {
        ALG_EDDSA
    }

    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>, SignatureError> {
        Ok(self.key.sign(data).as_bytes().to_vec())
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

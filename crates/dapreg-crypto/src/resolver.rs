//! # Key Resolver Capability
//!
//! The sole seam to identity infrastructure: given a key identifier
//! (conventionally `<did>#<fragment>`), return public verification key
//! material or a not-found failure. The core never initiates network
//! calls itself — a resolver implementation may.

use std::collections::HashMap;

use crate::ed25519::Ed25519PublicKey;
use crate::error::ResolutionError;

/// Trait for dereferencing a key identifier to verification key material.
///
/// Implementations must be `Send + Sync` so independent verifications
/// can run concurrently.
pub trait KeyResolver: Send + Sync {
    /// Resolve `kid` to public key material, or fail with
    /// [`ResolutionError`] when the reference cannot be dereferenced to
    /// a verification method with usable key material.
    fn resolve(&self, kid: &str) -> Result<Ed25519PublicKey, ResolutionError>;
}

/// Adapter turning a closure into a [`KeyResolver`].
///
/// Useful when the resolution logic is a one-off lookup and a named
/// type would be ceremony.
pub struct FnResolver<F>(pub F);

impl<F> KeyResolver for FnResolver<F>
where
    F: Fn(&str) -> Result<Ed25519PublicKey, ResolutionError> + Send + Sync,
{
    fn resolve(&self, kid: &str) -> Result<Ed25519PublicKey, ResolutionError> {
        (self.0)(kid)
    }
}

/// In-memory kid → key map for tests and fixed deployments.
#[derive(Debug, Default)]
pub struct StaticKeyResolver {
    keys: HashMap<String, Ed25519PublicKey>,
}

impl StaticKeyResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register key material under a key identifier.
    pub fn insert(&mut self, kid: impl Into<String>, key: Ed25519PublicKey) {
        self.keys.insert(kid.into(), key);
    }

    /// Builder-style registration.
    pub fn with(mut self, kid: impl Into<String>, key: Ed25519PublicKey) -> Self {
        self.insert(kid, key);
        self
    }
}

impl KeyResolver for StaticKeyResolver {
    fn resolve(&self, kid: &str) -> Result<Ed25519PublicKey, ResolutionError> {
        self.keys
            .get(kid)
            .cloned()
            .ok_or_else(|| ResolutionError::NotFound(kid.to_string()))
    }
}

//! # Cryptographic Error Types
//!
//! Structured errors for signing, verification, and key resolution.
//! Every compact-signature failure cause is a distinct variant so that
//! callers branch on kind, not on message substrings.

use thiserror::Error;

/// Errors from compact-signature encoding, decoding, and verification.
#[derive(Error, Debug)]
pub enum SignatureError {
    /// The signature value was not a string.
    #[error("Expected Compact JWS in string format")]
    NotAString,

    /// The compact form did not split into exactly three segments.
    #[error("Expected Compact JWS with 3 parts")]
    SegmentCount,

    /// A detached verification was asked to process a signature whose
    /// payload segment is non-empty.
    #[error("Expected detached JWS with empty payload")]
    UnexpectedPayload,

    /// The header segment was not base64url-encoded JSON.
    #[error("Invalid JWS header")]
    InvalidHeader,

    /// The header carries no usable `alg` value.
    #[error("Missing or invalid algorithm")]
    MissingAlgorithm,

    /// The declared algorithm is not one this codec can verify.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The header carries no usable `kid` value.
    #[error("Missing or invalid key ID")]
    MissingKeyId,

    /// The key resolver could not produce verification key material.
    #[error("kid does not dereference to a verification method")]
    UnresolvableKey(#[source] ResolutionError),

    /// Cryptographic verification of the signature failed.
    #[error("Integrity mismatch")]
    IntegrityMismatch,

    /// The recovered signer identity is not a well-formed DID.
    #[error("kid does not carry a valid DID: {0}")]
    InvalidSignerIdentity(#[from] dapreg_core::ValidationError),

    /// The signing capability failed to produce signature bytes.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// Key material was malformed (wrong length or bad encoding).
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),
}

/// Errors from dereferencing a key identifier to key material.
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// No verification method with public key material exists for the kid.
    #[error("no verification method found for kid \"{0}\"")]
    NotFound(String),

    /// The resolver reached its backing store but the material was unusable.
    #[error("verification method for kid \"{kid}\" has no usable key material: {reason}")]
    UnusableKeyMaterial {
        /// The key identifier that was dereferenced.
        kid: String,
        /// Why the material could not be used.
        reason: String,
    },
}

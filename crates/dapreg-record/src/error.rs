//! # Record Error Types
//!
//! Failures from constructing, signing, verifying, and parsing
//! registration records. Lower-layer failures compose in transparently
//! so callers see one error type at the record surface.

use thiserror::Error;

use dapreg_core::{CanonicalizationError, Did, ValidationError};
use dapreg_crypto::SignatureError;

/// Errors from registration record operations.
#[derive(Error, Debug)]
pub enum RecordError {
    /// `verify()` was called on an unsigned record.
    #[error("Signature is missing")]
    SignatureMissing,

    /// The signer identity recovered from the signature differs from
    /// the record's declared DID.
    #[error("signature does not match declared identity (declared {declared}, recovered {recovered})")]
    IdentityMismatch {
        /// The DID the record claims.
        declared: Did,
        /// The DID recovered from the verified signature's key id.
        recovered: Did,
    },

    /// The raw input could not be parsed as a record shape.
    #[error("parse failure: {0}")]
    Parse(String),

    /// A compact-signature operation failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),

    /// An identifier failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Digest-payload canonicalization failed.
    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}

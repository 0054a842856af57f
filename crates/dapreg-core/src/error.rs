//! # Error Hierarchy
//!
//! Structured error types for the foundational crate, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Identifier parsing reports which structural rule failed — prefix,
//! separator, length, or character set — as a distinct variant or a
//! named rule, so callers can branch on kind instead of matching
//! message strings.

use thiserror::Error;

/// Validation errors for identifier grammars.
///
/// Each identifier type enforces its grammar at construction time.
/// These errors carry the invalid input and the violated rule so that
/// callers can diagnose malformed input without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// DID does not conform to W3C DID syntax (did:method:identifier).
    #[error("invalid DID format: \"{0}\" (expected did:<method>:<identifier>)")]
    InvalidDid(String),

    /// URN does not conform to `urn:<nid>:<nss>`.
    #[error("invalid URN: \"{value}\" ({rule})")]
    InvalidUrn {
        /// The string that failed to parse.
        value: String,
        /// The structural rule that was violated.
        rule: &'static str,
    },

    /// DAP does not conform to `@<handle>/<domain>`.
    #[error("invalid DAP: \"{value}\" ({rule})")]
    InvalidDap {
        /// The string that failed to parse.
        value: String,
        /// The structural rule that was violated.
        rule: &'static str,
    },

    /// Registration id type tag is not `reg`.
    #[error("invalid registration id \"{0}\": type prefix is not \"reg\"")]
    RegistrationIdPrefix(String),

    /// Registration id suffix has the wrong length.
    #[error("invalid registration id \"{value}\": suffix must be 26 characters, got {length}")]
    RegistrationIdLength {
        /// The string that failed to parse.
        value: String,
        /// The actual suffix length.
        length: usize,
    },

    /// Registration id suffix contains a character outside the
    /// base32 alphabet, or its leading character overflows 128 bits.
    #[error("invalid registration id \"{value}\": invalid character '{ch}' in suffix")]
    RegistrationIdCharset {
        /// The string that failed to parse.
        value: String,
        /// The offending character.
        ch: char,
    },
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

//! # dapreg-record — Identity Registration Records
//!
//! Issues and verifies signed, time-ordered registration records that
//! bind a human-readable handle, a domain, and a decentralized
//! identifier into one tamper-evident object.
//!
//! ## Lifecycle
//!
//! A record enters the world through [`RegistrationRecord::create`]
//! (unsigned — the caller must sign it before it is trustworthy) or
//! through [`RegistrationRecord::parse`] (the signature must already
//! be present and verify, or construction fails).
//!
//! ## Data flow
//!
//! `create` → the record canonical-digests its own fields → a
//! [`Signer`](dapreg_crypto::Signer) produces a detached compact
//! signature over the digest → a later verifier re-derives the digest,
//! resolves the signer's key through a
//! [`KeyResolver`](dapreg_crypto::KeyResolver), and checks the
//! signature and the declared identity.

pub mod error;
pub mod record;

// Re-export primary types.
pub use error::RecordError;
pub use record::RegistrationRecord;

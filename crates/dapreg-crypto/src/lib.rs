//! # dapreg-crypto — Cryptographic Seams for the DAP Registry
//!
//! This crate provides the cryptographic building blocks the
//! registration record depends on:
//!
//! - **Capability traits** — [`Signer`] (private-key custody) and
//!   [`KeyResolver`] (kid → verification key material). Both are
//!   injected explicitly into sign/verify calls, never looked up from
//!   ambient state, so test doubles slot in without ceremony.
//! - **Ed25519 wrappers** over `ed25519-dalek` with hex-rendered public
//!   keys and redacted private-key `Debug` output.
//! - **Compact JWS codec** — the three-segment
//!   `base64url(header).base64url(payload).base64url(signature)` wire
//!   format, including the detached variant with an empty payload
//!   segment.
//!
//! ## Security Invariants
//!
//! - The codec never holds private key material; it delegates "sign
//!   these bytes" to the [`Signer`] capability.
//! - Every verification failure is a distinct [`SignatureError`]
//!   variant — callers branch on kind, not message substrings.

pub mod ed25519;
pub mod error;
pub mod jws;
pub mod resolver;
pub mod signer;

// Re-export primary types.
pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use error::{ResolutionError, SignatureError};
pub use jws::{sign, verify, JwsHeader, PayloadMode};
pub use resolver::{FnResolver, KeyResolver, StaticKeyResolver};
pub use signer::{Ed25519Signer, Signer, ALG_EDDSA};

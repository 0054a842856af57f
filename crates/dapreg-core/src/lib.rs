#![deny(missing_docs)]

//! # dapreg-core — Foundational Types for the DAP Registry
//!
//! This crate defines the value types every other crate in the
//! workspace depends on. It has no internal crate dependencies — only
//! `serde`, `serde_json`, `thiserror`, `chrono`, `uuid`, `rand_core`,
//! and `sha2` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifier grammars.** [`Did`], [`Urn`],
//!    [`Dap`], and [`RegistrationId`] are distinct types with checked
//!    constructors; `Display` of a parsed value reproduces the input
//!    byte-for-byte.
//!
//! 2. **[`CanonicalBytes`] is the sole path to digest computation.**
//!    Every content digest flows through `CanonicalBytes::new()`, which
//!    serializes with sorted object keys and compact separators.
//!
//! 3. **Structured errors with `thiserror`.** Parsing failures name the
//!    violated structural rule as a distinct variant — no
//!    `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod regid;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, ContentDigest};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{Dap, Did, Urn};
pub use regid::RegistrationId;

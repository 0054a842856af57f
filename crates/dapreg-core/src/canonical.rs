//! # Canonical Serialization
//!
//! This module defines [`CanonicalBytes`], the sole construction path
//! for bytes used in digest computation across the workspace.
//!
//! ## Security Invariant
//!
//! The inner `Vec<u8>` is private. The only way to construct
//! `CanonicalBytes` is through [`CanonicalBytes::new()`] /
//! [`CanonicalBytes::from_value()`], which walk the value and serialize
//! with lexicographically sorted object keys and compact separators.
//! Two structurally equal payloads — regardless of map key insertion
//! order — always canonicalize to byte-identical output. Sequence
//! element order is significant and preserved.
//!
//! ## Canonical Rules
//!
//! 1. Reject non-integer numbers — amounts must be strings or integers.
//! 2. Sort object keys lexicographically at every nesting level.
//! 3. Compact separators, no insignificant whitespace.
//!
//! Key sorting relies on `serde_json`'s default `BTreeMap`-backed
//! `Map`; the `preserve_order` feature must not be enabled anywhere in
//! the dependency graph.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by canonical serialization.
///
/// The inner `Vec<u8>` is private — downstream code cannot construct
/// `CanonicalBytes` except through the checked constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// All digest computation in the workspace must flow through this
    /// constructor (or [`from_value`](Self::from_value)).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Self::from_value(serde_json::to_value(obj)?)
    }

    /// Construct canonical bytes from an already-built JSON value.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        check_canonicalizable(&value)?;
        Ok(Self(serde_json::to_vec(&value)?))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume and return the inner byte vector.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Recursively check a JSON value against the canonical rules.
fn check_canonicalizable(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) => {
            if n.is_f64() && !n.is_i64() && !n.is_u64() {
                // as_f64 is always Some for an f64-only number.
                return Err(CanonicalizationError::FloatRejected(
                    n.as_f64().unwrap_or(f64::NAN),
                ));
            }
            Ok(())
        }
        Value::Object(map) => map.values().try_for_each(check_canonicalizable),
        Value::Array(arr) => arr.iter().try_for_each(check_canonicalizable),
        _ => Ok(()),
    }
}

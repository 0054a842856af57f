//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers a registration record
//! is built from. Each identifier is a distinct type — you cannot pass
//! a [`Dap`] where a [`Did`] is expected.
//!
//! ## Validation
//!
//! Every string-based identifier validates its grammar at construction
//! time, and `Display` of a parsed value reproduces the input
//! byte-for-byte (round-trip law).
//!
//! ## Grammars
//!
//! - DID: `did:<method>:<method-specific-id>` (W3C DID syntax)
//! - URN: `urn:<nid>:<nss>` — `nid` non-empty with no `:`, `nss`
//!   non-empty and may contain further `:`
//! - DAP: `@<handle>/<domain>` — both segments non-empty, neither may
//!   contain `@` or `/`

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `parse()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Did
// ---------------------------------------------------------------------------

/// W3C Decentralized Identifier (DID).
///
/// Format: `did:<method>:<method-specific-id>` where method is
/// lowercase alphanumeric and the method-specific id is non-empty (and
/// may itself contain `:`). Resolution mechanics are out of scope for
/// this crate; a `Did` is an opaque, dereferenceable identity string.
///
/// Reference: <https://www.w3.org/TR/did-core/#did-syntax>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl_validating_deserialize!(Did);

impl Did {
    /// Parse a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let rest = s
            .strip_prefix("did:")
            .ok_or_else(|| ValidationError::InvalidDid(s.to_string()))?;

        let (method, identifier) = rest
            .split_once(':')
            .ok_or_else(|| ValidationError::InvalidDid(s.to_string()))?;

        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        if identifier.is_empty() {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }

        Ok(Self(s.to_string()))
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the DID method (the part between the first and second colons).
    pub fn method(&self) -> &str {
        let rest = &self.0[4..];
        let colon_pos = rest.find(':').expect("validated at construction");
        &rest[..colon_pos]
    }

    /// Return the method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        let rest = &self.0[4..];
        let colon_pos = rest.find(':').expect("validated at construction");
        &rest[colon_pos + 1..]
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Did {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Urn
// ---------------------------------------------------------------------------

/// Generic namespaced identifier: `urn:<nid>:<nss>`.
///
/// The namespace id (`nid`) is non-empty and contains no `:`; the
/// namespace-specific string (`nss`) is non-empty and may contain
/// further `:` characters, which belong to the nss verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Urn {
    nid: String,
    nss: String,
}

impl Urn {
    /// Parse a URN from its string form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidUrn`] naming the violated rule:
    /// missing `urn:` prefix, empty namespace id, missing second `:`
    /// separator, or empty namespace-specific string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = |rule: &'static str| ValidationError::InvalidUrn {
            value: s.to_string(),
            rule,
        };

        let rest = s
            .strip_prefix("urn:")
            .ok_or_else(|| invalid("missing 'urn:' prefix"))?;
        let (nid, nss) = rest
            .split_once(':')
            .ok_or_else(|| invalid("missing ':' separator"))?;
        if nid.is_empty() {
            return Err(invalid("empty namespace id"));
        }
        if nss.is_empty() {
            return Err(invalid("empty namespace-specific string"));
        }

        Ok(Self {
            nid: nid.to_string(),
            nss: nss.to_string(),
        })
    }

    /// The namespace identifier.
    pub fn nid(&self) -> &str {
        &self.nid
    }

    /// The namespace-specific string.
    pub fn nss(&self) -> &str {
        &self.nss
    }
}

impl std::fmt::Display for Urn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "urn:{}:{}", self.nid, self.nss)
    }
}

impl std::str::FromStr for Urn {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Urn {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Urn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Dap
// ---------------------------------------------------------------------------

/// Handle/domain identifier: `@<handle>/<domain>`.
///
/// Both segments are non-empty and neither may contain `@` or `/`.
/// The canonical form is `@` + handle + `/` + domain, and parsing a
/// canonical form reproduces it exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dap {
    handle: String,
    domain: String,
}

impl_validating_deserialize!(Dap);

impl Dap {
    /// Build a DAP from its two segments, validating each.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDap`] if either segment is
    /// empty or contains `@` or `/`.
    pub fn new(handle: impl Into<String>, domain: impl Into<String>) -> Result<Self, ValidationError> {
        let handle = handle.into();
        let domain = domain.into();

        let checked = check_handle(&handle).and_then(|()| check_domain(&domain));
        if let Err(rule) = checked {
            return Err(ValidationError::InvalidDap {
                value: format!("@{handle}/{domain}"),
                rule,
            });
        }

        Ok(Self { handle, domain })
    }

    /// Parse a DAP from its canonical `@handle/domain` form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDap`] naming the violated rule:
    /// missing `@` prefix, missing `/` separator, or a segment that is
    /// empty or contains a forbidden character.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = |rule: &'static str| ValidationError::InvalidDap {
            value: s.to_string(),
            rule,
        };

        let rest = s
            .strip_prefix('@')
            .ok_or_else(|| invalid("missing '@' prefix"))?;
        let (handle, domain) = rest
            .split_once('/')
            .ok_or_else(|| invalid("missing '/' separator"))?;

        check_handle(handle).map_err(invalid)?;
        check_domain(domain).map_err(invalid)?;

        Ok(Self {
            handle: handle.to_string(),
            domain: domain.to_string(),
        })
    }

    /// The handle segment (no `@` prefix).
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// The domain segment.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

/// Check the handle segment against the shared segment grammar.
fn check_handle(segment: &str) -> Result<(), &'static str> {
    if segment.is_empty() {
        return Err("empty handle segment");
    }
    if segment.contains('@') || segment.contains('/') {
        return Err("forbidden character in handle segment");
    }
    Ok(())
}

/// Check the domain segment against the shared segment grammar.
///
/// The second `/` of an input like `@a/b/c` lands inside the domain
/// segment after the single `split_once`, so this check also covers
/// trailing-separator and embedded-separator inputs.
fn check_domain(segment: &str) -> Result<(), &'static str> {
    if segment.is_empty() {
        return Err("empty domain segment");
    }
    if segment.contains('@') || segment.contains('/') {
        return Err("forbidden character in domain segment");
    }
    Ok(())
}

impl std::fmt::Display for Dap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}/{}", self.handle, self.domain)
    }
}

impl std::str::FromStr for Dap {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Dap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

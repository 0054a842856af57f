//! # Registration Identifiers
//!
//! Type-tagged, time-ordered unique identifiers for registration
//! records. The inner value is a UUIDv7: the 48 most-significant bits
//! carry Unix-epoch milliseconds, the remainder is CSPRNG output (plus
//! the UUID version/variant bits). Ids created at different
//! milliseconds therefore sort consistently with creation order.
//!
//! ## String form
//!
//! `reg_` + 26 characters of lowercase Crockford base32 over the full
//! 128-bit value. The embedded-timestamp width — 48 bits, the 6
//! most-significant bytes — is a fixed contract of the identifier
//! format: extraction shifts the 128-bit value, never slices the
//! string encoding.

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// The fixed type tag carried by every registration id.
pub const REGISTRATION_ID_PREFIX: &str = "reg";

/// Length of the base32 suffix encoding the 128-bit value.
const SUFFIX_LEN: usize = 26;

/// Lowercase Crockford base32 alphabet (no i, l, o, u).
const ALPHABET: &[u8; 32] = b"0123456789abcdefghjkmnpqrstvwxyz";

/// A time-ordered unique identifier for a registration record.
///
/// Created once at record construction time and immutable thereafter;
/// the only other way to obtain one is parsing an existing string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Generate a fresh identifier at the current wall-clock time.
    ///
    /// Uniqueness rests on 74 random bits per millisecond; no
    /// cross-process coordination is performed.
    pub fn create() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        // timestamp_millis is non-negative for any date after 1970.
        Self::from_millis(millis as u64)
    }

    /// Generate a fresh identifier at a caller-supplied millisecond
    /// timestamp. `create()` delegates here with the current wall clock;
    /// tests use it to pin the embedded timestamp.
    pub fn from_millis(millis: u64) -> Self {
        let mut bytes = [0u8; 16];
        bytes[..6].copy_from_slice(&millis.to_be_bytes()[2..8]);
        OsRng.fill_bytes(&mut bytes[6..]);
        bytes[6] = (bytes[6] & 0x0f) | 0x70; // version 7
        bytes[8] = (bytes[8] & 0x3f) | 0x80; // RFC 4122 variant
        Self(Uuid::from_bytes(bytes))
    }

    /// Parse an identifier from its `reg_<suffix>` string form.
    ///
    /// # Errors
    ///
    /// The three failure causes are distinct variants:
    /// [`ValidationError::RegistrationIdPrefix`] when the type tag is
    /// not `reg`, [`ValidationError::RegistrationIdLength`] when the
    /// suffix is not exactly 26 characters, and
    /// [`ValidationError::RegistrationIdCharset`] when the suffix
    /// contains a character outside the base32 alphabet or its leading
    /// character overflows 128 bits.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let (prefix, suffix) = s.split_once('_').unwrap_or((s, ""));
        if prefix != REGISTRATION_ID_PREFIX {
            return Err(ValidationError::RegistrationIdPrefix(s.to_string()));
        }
        if suffix.len() != SUFFIX_LEN {
            return Err(ValidationError::RegistrationIdLength {
                value: s.to_string(),
                length: suffix.len(),
            });
        }

        let mut value: u128 = 0;
        for (i, ch) in suffix.chars().enumerate() {
            let digit = decode_char(ch).ok_or_else(|| ValidationError::RegistrationIdCharset {
                value: s.to_string(),
                ch,
            })?;
            // 26 base32 digits hold 130 bits; the top 2 must be zero.
            if i == 0 && digit > 7 {
                return Err(ValidationError::RegistrationIdCharset {
                    value: s.to_string(),
                    ch,
                });
            }
            value = (value << 5) | u128::from(digit);
        }

        Ok(Self(Uuid::from_u128(value)))
    }

    /// Decode the embedded creation time as Unix-epoch milliseconds.
    ///
    /// The width is fixed: the 48 most-significant bits of the 128-bit
    /// value, independent of the string encoding base.
    pub fn timestamp_millis(&self) -> u64 {
        (self.0.as_u128() >> 80) as u64
    }

    /// The embedded creation time as a calendar timestamp.
    pub fn datetime(&self) -> chrono::DateTime<chrono::Utc> {
        chrono::DateTime::from_timestamp_millis(self.timestamp_millis() as i64)
            .expect("48-bit millisecond timestamp is within chrono range")
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// Encode a 128-bit value as 26 lowercase Crockford base32 characters.
fn encode_suffix(value: u128) -> String {
    let mut out = String::with_capacity(SUFFIX_LEN);
    for i in 0..SUFFIX_LEN {
        let shift = 5 * (SUFFIX_LEN - 1 - i);
        let digit = ((value >> shift) & 0x1f) as usize;
        out.push(ALPHABET[digit] as char);
    }
    out
}

/// Decode one Crockford base32 character, or `None` if outside the alphabet.
fn decode_char(ch: char) -> Option<u8> {
    ALPHABET.iter().position(|&a| a as char == ch).map(|p| p as u8)
}

impl std::fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}_{}",
            REGISTRATION_ID_PREFIX,
            encode_suffix(self.0.as_u128())
        )
    }
}

impl std::str::FromStr for RegistrationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for RegistrationId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RegistrationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

//! # Registration Records
//!
//! A [`RegistrationRecord`] binds a handle, a domain, and a DID into
//! one tamper-evident object. The record digests its own fields
//! through the canonical pipeline, is signed with a detached compact
//! signature over that digest, and verifies by re-deriving the digest
//! and resolving the signer's key.
//!
//! ## Security Invariants
//!
//! - The digest payload is exactly `{id, handle, did, domain}`,
//!   canonicalized via [`CanonicalBytes`] — never raw
//!   `serde_json::to_vec()`.
//! - A parsed record is verified before it is handed to the caller;
//!   parsing an unsigned or incorrectly signed record always fails.
//! - The declared `did` must equal the identity recovered from the
//!   signature, or verification fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use dapreg_core::{sha256_digest, CanonicalBytes, ContentDigest, Dap, Did, RegistrationId};
use dapreg_crypto::{jws, KeyResolver, PayloadMode, SignatureError, Signer};

use crate::error::RecordError;

/// A signed, time-ordered identity registration record.
///
/// Serde field order is the persisted wire order:
/// `{id, handle, did, domain, signature}`. The `signature` field is
/// omitted from JSON while the record is unsigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Time-ordered unique identifier, allocated at creation.
    pub id: RegistrationId,
    /// The human-readable handle being registered.
    pub handle: String,
    /// The registrant's decentralized identifier.
    pub did: Did,
    /// The domain the handle is registered under.
    pub domain: String,
    /// Detached compact signature over the record digest, if signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl RegistrationRecord {
    /// Assemble a fresh, unsigned record.
    ///
    /// Allocates a new [`RegistrationId`] and validates the field
    /// shapes: handle and domain follow the DAP segment grammar, `did`
    /// must be well-formed DID syntax. Two calls with identical inputs
    /// never produce equal records — the ids differ.
    ///
    /// The record is not trustworthy until [`sign`](Self::sign) runs.
    pub fn create(handle: &str, did: &str, domain: &str) -> Result<Self, RecordError> {
        let record = Self {
            id: RegistrationId::create(),
            handle: handle.to_string(),
            did: Did::parse(did)?,
            domain: domain.to_string(),
            signature: None,
        };
        record.validate_shape()?;
        Ok(record)
    }

    /// Structural validation of the string fields.
    ///
    /// Extensible policy point: currently the handle and domain must
    /// satisfy the DAP segment grammar (non-empty, no `@` or `/`).
    fn validate_shape(&self) -> Result<(), RecordError> {
        Dap::new(&self.handle, &self.domain)?;
        Ok(())
    }

    /// The DAP this record registers.
    pub fn dap(&self) -> Dap {
        Dap::new(&self.handle, &self.domain).expect("validated at construction")
    }

    /// Canonical digest of exactly `{id, handle, did, domain}`.
    pub fn digest(&self) -> Result<ContentDigest, RecordError> {
        let payload = serde_json::json!({
            "id": self.id.to_string(),
            "handle": self.handle,
            "did": self.did,
            "domain": self.domain,
        });
        Ok(sha256_digest(&CanonicalBytes::from_value(payload)?))
    }

    /// Sign the record's digest with a detached compact signature and
    /// store the result on the record.
    ///
    /// The signer capability holds the private key; this method only
    /// delegates "sign these bytes".
    pub fn sign(&mut self, signer: &dyn Signer) -> Result<(), RecordError> {
        let digest = self.digest()?;
        let token = jws::sign(signer, digest.as_bytes(), PayloadMode::Detached)?;
        self.signature = Some(token);
        debug!(id = %self.id, kid = signer.key_id(), "registration record signed");
        Ok(())
    }

    /// Verify the stored signature and return the signer's identity.
    ///
    /// Recomputes the digest, verifies the detached signature over it,
    /// and checks that the recovered identity equals the declared
    /// `did`. Any failure means the record must be rejected whole.
    pub fn verify(&self, resolver: &dyn KeyResolver) -> Result<Did, RecordError> {
        let Some(signature) = &self.signature else {
            return Err(RecordError::SignatureMissing);
        };
        let digest = self.digest()?;
        let recovered = jws::verify(signature, Some(digest.as_bytes()), resolver)?;
        if recovered != self.did {
            return Err(RecordError::IdentityMismatch {
                declared: self.did.clone(),
                recovered,
            });
        }
        debug!(id = %self.id, did = %recovered, "registration record verified");
        Ok(recovered)
    }

    /// Parse a serialized record and verify it.
    ///
    /// Parsing an unsigned or incorrectly signed record always fails;
    /// a record that survives `parse` is verified.
    pub fn parse(raw: &str, resolver: &dyn KeyResolver) -> Result<Self, RecordError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| RecordError::Parse(e.to_string()))?;
        Self::from_value(value, resolver)
    }

    /// Parse a pre-decoded record shape and verify it.
    pub fn from_value(value: Value, resolver: &dyn KeyResolver) -> Result<Self, RecordError> {
        let record = record_from_value(value)?;
        record.verify(resolver)?;
        Ok(record)
    }

    /// Serialize to the persisted JSON shape
    /// (`{id, handle, did, domain, signature}`).
    pub fn to_json_string(&self) -> Result<String, RecordError> {
        serde_json::to_string(self).map_err(|e| RecordError::Parse(e.to_string()))
    }
}

/// Convert a raw JSON value into a record without verifying it.
///
/// The `signature` field must be a string when present — a non-string
/// value is rejected before the typed conversion so the failure names
/// the signature rather than a generic shape mismatch.
fn record_from_value(value: Value) -> Result<RegistrationRecord, RecordError> {
    if let Some(signature) = value.get("signature") {
        if !signature.is_string() {
            return Err(SignatureError::NotAString.into());
        }
    }
    let record: RegistrationRecord =
        serde_json::from_value(value).map_err(|e| RecordError::Parse(e.to_string()))?;
    record.validate_shape()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dapreg_crypto::{Ed25519Signer, StaticKeyResolver};

    const DID: &str = "did:dht:alice123";
    const KID: &str = "did:dht:alice123#0";

    fn signer_and_resolver() -> (Ed25519Signer, StaticKeyResolver) {
        let signer = Ed25519Signer::generate(KID);
        let resolver = StaticKeyResolver::new().with(KID, signer.public_key());
        (signer, resolver)
    }

    fn signed_record(signer: &Ed25519Signer) -> RegistrationRecord {
        let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        record.sign(signer).unwrap();
        record
    }

    // -- creation --

    #[test]
    fn create_allocates_distinct_ids() {
        let a = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        let b = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn create_rejects_malformed_fields() {
        assert!(RegistrationRecord::create("", DID, "didpay.me").is_err());
        assert!(RegistrationRecord::create("al/ice", DID, "didpay.me").is_err());
        assert!(RegistrationRecord::create("alice", DID, "did@pay.me").is_err());
        assert!(RegistrationRecord::create("alice", "not-a-did", "didpay.me").is_err());
    }

    #[test]
    fn created_record_is_unsigned() {
        let record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        assert!(record.signature.is_none());
    }

    #[test]
    fn dap_accessor_combines_segments() {
        let record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        assert_eq!(record.dap().to_string(), "@alice/didpay.me");
    }

    // -- digest --

    #[test]
    fn digest_is_stable_for_same_fields() {
        let record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        assert_eq!(record.digest().unwrap(), record.digest().unwrap());
    }

    #[test]
    fn digest_ignores_signature_presence() {
        let (signer, _) = signer_and_resolver();
        let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        let before = record.digest().unwrap();
        record.sign(&signer).unwrap();
        assert_eq!(record.digest().unwrap(), before);
    }

    #[test]
    fn digest_differs_across_records() {
        let a = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        let b = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        // Different ids, different digests.
        assert_ne!(a.digest().unwrap(), b.digest().unwrap());
    }

    // -- sign / verify --

    #[test]
    fn sign_then_verify_recovers_identity() {
        let (signer, resolver) = signer_and_resolver();
        let record = signed_record(&signer);
        let identity = record.verify(&resolver).unwrap();
        assert_eq!(identity.as_str(), DID);
    }

    #[test]
    fn verify_unsigned_fails_with_signature_missing() {
        let (_, resolver) = signer_and_resolver();
        let record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        assert!(matches!(
            record.verify(&resolver),
            Err(RecordError::SignatureMissing)
        ));
    }

    #[test]
    fn verify_fails_when_did_tampered_after_signing() {
        let (signer, resolver) = signer_and_resolver();
        let mut record = signed_record(&signer);
        record.did = Did::parse("did:dht:mallory999").unwrap();
        // The digest now differs from the signed one.
        assert!(record.verify(&resolver).is_err());
    }

    #[test]
    fn verify_fails_when_handle_tampered_after_signing() {
        let (signer, resolver) = signer_and_resolver();
        let mut record = signed_record(&signer);
        record.handle = "mallory".to_string();
        assert!(matches!(
            record.verify(&resolver),
            Err(RecordError::Signature(SignatureError::IntegrityMismatch))
        ));
    }

    #[test]
    fn verify_detects_identity_mismatch() {
        // Signature verifies under the signer's kid, but the record
        // declares a different DID.
        let signer = Ed25519Signer::generate("did:dht:mallory999#0");
        let resolver =
            StaticKeyResolver::new().with("did:dht:mallory999#0", signer.public_key());
        let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        record.sign(&signer).unwrap();
        assert!(matches!(
            record.verify(&resolver),
            Err(RecordError::IdentityMismatch { .. })
        ));
    }

    #[test]
    fn verify_fails_when_key_unresolvable() {
        let (signer, _) = signer_and_resolver();
        let record = signed_record(&signer);
        let empty = StaticKeyResolver::new();
        assert!(matches!(
            record.verify(&empty),
            Err(RecordError::Signature(SignatureError::UnresolvableKey(_)))
        ));
    }

    // -- parse / serialize --

    #[test]
    fn serialized_field_order_is_fixed() {
        let (signer, _) = signer_and_resolver();
        let record = signed_record(&signer);
        let json = record.to_json_string().unwrap();
        let id_pos = json.find("\"id\"").unwrap();
        let handle_pos = json.find("\"handle\"").unwrap();
        let did_pos = json.find("\"did\"").unwrap();
        let domain_pos = json.find("\"domain\"").unwrap();
        let sig_pos = json.find("\"signature\"").unwrap();
        assert!(id_pos < handle_pos);
        assert!(handle_pos < did_pos);
        assert!(did_pos < domain_pos);
        assert!(domain_pos < sig_pos);
    }

    #[test]
    fn parse_roundtrip_preserves_serialization() {
        let (signer, resolver) = signer_and_resolver();
        let record = signed_record(&signer);
        let json = record.to_json_string().unwrap();
        let parsed = RegistrationRecord::parse(&json, &resolver).unwrap();
        assert_eq!(parsed, record);
        assert_eq!(parsed.to_json_string().unwrap(), json);
    }

    #[test]
    fn parse_rejects_unsigned_record() {
        let (_, resolver) = signer_and_resolver();
        let record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        let json = record.to_json_string().unwrap();
        assert!(matches!(
            RegistrationRecord::parse(&json, &resolver),
            Err(RecordError::SignatureMissing)
        ));
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let (_, resolver) = signer_and_resolver();
        match RegistrationRecord::parse("{not json", &resolver) {
            Err(RecordError::Parse(_)) => {}
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn parse_rejects_non_string_signature() {
        let (_, resolver) = signer_and_resolver();
        let record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
        let mut value = serde_json::to_value(&record).unwrap();
        value["signature"] = serde_json::json!(42);
        assert!(matches!(
            RegistrationRecord::from_value(value, &resolver),
            Err(RecordError::Signature(SignatureError::NotAString))
        ));
    }

    #[test]
    fn parse_rejects_tampered_serialized_record() {
        let (signer, resolver) = signer_and_resolver();
        let record = signed_record(&signer);
        let json = record
            .to_json_string()
            .unwrap()
            .replace("alice", "mallory");
        assert!(RegistrationRecord::parse(&json, &resolver).is_err());
    }

    #[test]
    fn parse_rejects_missing_fields() {
        let (_, resolver) = signer_and_resolver();
        match RegistrationRecord::parse(r#"{"handle":"alice"}"#, &resolver) {
            Err(RecordError::Parse(_)) => {}
            other => panic!("expected parse failure, got {other:?}"),
        }
    }
}

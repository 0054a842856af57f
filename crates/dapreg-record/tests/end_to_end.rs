//! End-to-end exercise of the registration flow: create a record, sign
//! it with a real Ed25519 signer, serialize, parse the serialization
//! back, and check the round-trip and tamper-rejection laws.

use dapreg_core::Did;
use dapreg_crypto::{Ed25519Signer, SignatureError, StaticKeyResolver};
use dapreg_record::{RecordError, RegistrationRecord};

const DID: &str = "did:dht:ep4urqi5xurqsgqi8zegcdfdfq7s5wzry4tjqgkd9ewz3d9czwzo";
const KID: &str = "did:dht:ep4urqi5xurqsgqi8zegcdfdfq7s5wzry4tjqgkd9ewz3d9czwzo#0";

fn fixture() -> (Ed25519Signer, StaticKeyResolver) {
    let signer = Ed25519Signer::generate(KID);
    let resolver = StaticKeyResolver::new().with(KID, signer.public_key());
    (signer, resolver)
}

#[test]
fn create_sign_serialize_parse_roundtrip() {
    let (signer, resolver) = fixture();

    let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    record.sign(&signer).unwrap();
    record.verify(&resolver).unwrap();

    let json = record.to_json_string().unwrap();
    let parsed = RegistrationRecord::parse(&json, &resolver).unwrap();

    assert_eq!(parsed, record);
    assert_eq!(parsed.to_json_string().unwrap(), json);
}

#[test]
fn parsed_record_is_already_verified() {
    let (signer, resolver) = fixture();

    let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    record.sign(&signer).unwrap();
    let json = record.to_json_string().unwrap();

    // Parsing succeeds only because verification ran; the same input
    // against a resolver without the key fails.
    assert!(RegistrationRecord::parse(&json, &resolver).is_ok());
    let empty = StaticKeyResolver::new();
    assert!(matches!(
        RegistrationRecord::parse(&json, &empty),
        Err(RecordError::Signature(SignatureError::UnresolvableKey(_)))
    ));
}

#[test]
fn records_with_identical_inputs_are_never_equal() {
    let a = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    let b = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    assert_ne!(a, b);
    assert_ne!(a.id, b.id);
}

#[test]
fn tampering_any_field_after_signing_breaks_verification() {
    let (signer, resolver) = fixture();

    let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    record.sign(&signer).unwrap();

    let mut tampered = record.clone();
    tampered.handle = "mallory".to_string();
    assert!(tampered.verify(&resolver).is_err());

    let mut tampered = record.clone();
    tampered.domain = "evil.example".to_string();
    assert!(tampered.verify(&resolver).is_err());

    let mut tampered = record.clone();
    tampered.did = Did::parse("did:dht:mallory999").unwrap();
    assert!(tampered.verify(&resolver).is_err());
}

#[test]
fn record_signed_by_foreign_key_fails_identity_check() {
    // Mallory signs a record declaring Alice's DID. The signature
    // itself verifies under Mallory's key, so the failure must come
    // from the identity comparison.
    let mallory = Ed25519Signer::generate("did:dht:mallory999#0");
    let resolver = StaticKeyResolver::new().with("did:dht:mallory999#0", mallory.public_key());

    let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    record.sign(&mallory).unwrap();

    match record.verify(&resolver) {
        Err(RecordError::IdentityMismatch {
            declared,
            recovered,
        }) => {
            assert_eq!(declared.as_str(), DID);
            assert_eq!(recovered.as_str(), "did:dht:mallory999");
        }
        other => panic!("expected identity mismatch, got {other:?}"),
    }
}

#[test]
fn id_timestamp_orders_records_by_creation() {
    let a = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    let b = RegistrationRecord::create("bob", DID, "didpay.me").unwrap();
    assert!(a.id.timestamp_millis() <= b.id.timestamp_millis());
}

#[test]
fn serialized_shape_matches_wire_contract() {
    let (signer, _) = fixture();

    let mut record = RegistrationRecord::create("alice", DID, "didpay.me").unwrap();
    record.sign(&signer).unwrap();

    let value: serde_json::Value = serde_json::from_str(&record.to_json_string().unwrap()).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 5);
    assert!(obj["id"].as_str().unwrap().starts_with("reg_"));
    assert_eq!(obj["handle"], "alice");
    assert_eq!(obj["did"], DID);
    assert_eq!(obj["domain"], "didpay.me");
    // Detached compact signature: three segments, empty middle.
    let signature = obj["signature"].as_str().unwrap();
    let segments: Vec<&str> = signature.split('.').collect();
    assert_eq!(segments.len(), 3);
    assert!(segments[1].is_empty());
}

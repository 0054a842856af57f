//! # Compact JWS Codec
//!
//! Encodes and decodes the three-segment compact signature wire format:
//! `base64url(header).base64url(payload).base64url(signature)`, no
//! padding. The detached variant carries an empty payload segment; the
//! verifier supplies the signed payload out-of-band and the signing
//! input is reconstructed from its base64url encoding.
//!
//! ## Capability seams
//!
//! Signing delegates to a [`Signer`] and never sees private key
//! material. Verification resolves the header's `kid` through a
//! [`KeyResolver`] — the only bridge to identity infrastructure.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use dapreg_core::Did;

use crate::ed25519::Ed25519Signature;
use crate::error::SignatureError;
use crate::resolver::KeyResolver;
use crate::signer::{Signer, ALG_EDDSA};

/// The protected header of a compact signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwsHeader {
    /// Signing algorithm identifier (e.g. `EdDSA`).
    pub alg: String,
    /// Key identifier, conventionally `<did>#<fragment>`.
    pub kid: String,
}

/// Whether the payload segment is embedded in the compact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Payload is carried in the middle segment.
    Attached,
    /// Middle segment is empty; the verifier supplies the payload.
    Detached,
}

/// Produce a compact signature over `payload`.
///
/// Builds the `{alg, kid}` header from the signer's declarations,
/// obtains raw signature bytes over `headerB64 + "." + payloadB64`
/// from the [`Signer`] capability, and joins the three base64url
/// segments. In [`PayloadMode::Detached`] the payload segment is left
/// empty and the caller must re-supply the payload at verification.
pub fn sign(
    signer: &dyn Signer,
    payload: &[u8],
    mode: PayloadMode,
) -> Result<String, SignatureError> {
    let header = JwsHeader {
        alg: signer.algorithm().to_string(),
        kid: signer.key_id().to_string(),
    };
    let header_json = serde_json::to_vec(&header)
        .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;
    let header_b64 = URL_SAFE_NO_PAD.encode(header_json);
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload);

    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = signer.sign(signing_input.as_bytes())?;
    let sig_b64 = URL_SAFE_NO_PAD.encode(signature);

    Ok(match mode {
        PayloadMode::Attached => format!("{header_b64}.{payload_b64}.{sig_b64}"),
        PayloadMode::Detached => format!("{header_b64}..{sig_b64}"),
    })
}

/// Verify a compact signature and return the signer's identity.
///
/// When `detached_payload` is supplied the token must carry an empty
/// payload segment; the effective payload segment is the base64url
/// encoding of the supplied bytes. On success, returns the DID portion
/// of the header's `kid` (the substring before any `#` fragment).
///
/// Verification is a pure function of the token, the optional detached
/// payload, and the resolver's behavior at call time — every failure is
/// terminal for the call.
pub fn verify(
    token: &str,
    detached_payload: Option<&[u8]>,
    resolver: &dyn KeyResolver,
) -> Result<Did, SignatureError> {
    let parts: Vec<&str> = token.split('.').collect();
    let &[header_b64, payload_b64, sig_b64] = parts.as_slice() else {
        return Err(SignatureError::SegmentCount);
    };

    let effective_payload_b64 = match detached_payload {
        Some(payload) => {
            if !payload_b64.is_empty() {
                return Err(SignatureError::UnexpectedPayload);
            }
            URL_SAFE_NO_PAD.encode(payload)
        }
        None => payload_b64.to_string(),
    };

    let header_json = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| SignatureError::InvalidHeader)?;
    let header: serde_json::Value =
        serde_json::from_slice(&header_json).map_err(|_| SignatureError::InvalidHeader)?;

    let alg = header
        .get("alg")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingAlgorithm)?;
    let kid = header
        .get("kid")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingKeyId)?;
    if alg != ALG_EDDSA {
        return Err(SignatureError::UnsupportedAlgorithm(alg.to_string()));
    }

    let key = resolver
        .resolve(kid)
        .map_err(SignatureError::UnresolvableKey)?;

    let signature = URL_SAFE_NO_PAD
        .decode(sig_b64)
        .map_err(|_| SignatureError::IntegrityMismatch)
        .and_then(|bytes| Ed25519Signature::from_slice(&bytes))?;

    let signing_input = format!("{header_b64}.{effective_payload_b64}");
    key.verify(signing_input.as_bytes(), &signature)?;

    let identity = kid.split('#').next().unwrap_or(kid);
    Ok(Did::parse(identity)?)
}

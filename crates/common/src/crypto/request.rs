//! Canonical request signing for the directory protocol.
//!
//! Every authenticated call carries a signature over a canonical string
//! derived from the request, plus the caller-declared timestamp the string
//! was built with. The verifier rebuilds the exact same string from the
//! request it received, so any tampering with method, path, body, or
//! timestamp invalidates the signature.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::crypto::{PublicKey, SecretKey};

/// Header carrying the base64-encoded request signature.
pub const SIGNATURE_HEADER: &str = "harbor-signature";
/// Header carrying the caller-declared timestamp (integer seconds since
/// the Unix epoch, UTC).
pub const TIME_HEADER: &str = "harbor-time";
/// Maximum tolerated skew, in seconds, between the declared timestamp and
/// server time. The bound is inclusive: a request exactly this old (or this
/// far in the future) is still accepted.
pub const REPLAY_WINDOW_SECS: i64 = 300;

/// The signable form of a request:
/// `METHOD + ";" + PATH + ";" + base64(SHA-256(BODY)) + ";" + TIMESTAMP`.
///
/// `path` carries no leading slash.
#[derive(Debug, Clone)]
pub struct CanonicalRequest<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub body: &'a [u8],
    pub timestamp: i64,
}

/// Why a signature failed to check out against a canonical request.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerifyError {
    /// The signature material itself could not be decoded.
    #[error("signature is not valid base64 Ed25519 material")]
    Undecodable,
    /// Well-formed signature, wrong key or tampered request.
    #[error("signature does not match the canonical request")]
    Mismatch,
}

impl CanonicalRequest<'_> {
    /// Build the exact byte string that gets signed.
    pub fn to_canonical_string(&self) -> String {
        let digest = BASE64.encode(Sha256::digest(self.body));
        format!("{};{};{};{}", self.method, self.path, digest, self.timestamp)
    }

    /// Sign this request, returning the base64 signature for the
    /// signature header.
    pub fn sign(&self, key: &SecretKey) -> String {
        let signature = key.sign(self.to_canonical_string().as_bytes());
        BASE64.encode(signature.to_bytes())
    }

    /// Check a base64 signature from the signature header against this
    /// request and the claimed identity's public key.
    pub fn verify(&self, key: &PublicKey, signature: &str) -> Result<(), VerifyError> {
        let raw = BASE64
            .decode(signature)
            .map_err(|_| VerifyError::Undecodable)?;
        let raw: [u8; 64] = raw.try_into().map_err(|_| VerifyError::Undecodable)?;
        let signature = ed25519_dalek::Signature::from_bytes(&raw);
        key.verify(self.to_canonical_string().as_bytes(), &signature)
            .map_err(|_| VerifyError::Mismatch)
    }
}

/// Whether a claimed timestamp is close enough to `now` to accept.
pub fn within_replay_window(claimed: i64, now: i64) -> bool {
    (now - claimed).abs() <= REPLAY_WINDOW_SECS
}

/// Current server time as integer seconds since the Unix epoch.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

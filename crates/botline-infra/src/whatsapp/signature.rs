//! `X-Hub-Signature-256` verification for Cloud API webhook deliveries.
//!
//! Meta signs each POST body with HMAC-SHA256 keyed by the app secret and
//! sends it as `sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("missing signature header")]
    Missing,

    #[error("signature is not valid hex")]
    Malformed,

    #[error("signature verification failed")]
    Mismatch,

    #[error("invalid HMAC key: {0}")]
    InvalidKey(String),
}

/// Verify an HMAC-SHA256 signature with an optional `sha256=` prefix.
///
/// Comparison is constant-time (via the hmac crate's `verify_slice`).
pub fn verify_signature(secret: &[u8], body: &[u8], signature: Option<&str>) -> Result<(), SignatureError> {
    let signature = signature.map(str::trim).filter(|s| !s.is_empty()).ok_or(SignatureError::Missing)?;
    let hex_sig = signature.strip_prefix("sha256=").unwrap_or(signature);
    let expected = hex_decode(hex_sig).ok_or(SignatureError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SignatureError::InvalidKey(e.to_string()))?;
    mac.update(body);
    mac.verify_slice(&expected)
        .map_err(|_| SignatureError::Mismatch)
}

/// Compute the `sha256=<hex>` header value for `body`.
pub fn sign(secret: &[u8], body: &[u8]) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SignatureError::InvalidKey(e.to_string()))?;
    mac.update(body);
    Ok(format!("sha256={}", hex_encode(&mac.finalize().into_bytes())))
}

/// Decode a hex string into bytes. `None` on odd length or non-hex input.
fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Constant-time byte comparison (XOR-based). Used for the verify token.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"app-secret";
    const BODY: &[u8] = br#"{"object":"whatsapp_business_account","entry":[]}"#;

    #[test]
    fn test_sign_then_verify() {
        let header = sign(SECRET, BODY).unwrap();
        assert!(header.starts_with("sha256="));
        assert_eq!(header.len(), "sha256=".len() + 64);
        verify_signature(SECRET, BODY, Some(&header)).unwrap();
    }

    #[test]
    fn test_verify_without_prefix() {
        let header = sign(SECRET, BODY).unwrap();
        let bare = header.trim_start_matches("sha256=");
        verify_signature(SECRET, BODY, Some(bare)).unwrap();
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let header = sign(b"other-secret", BODY).unwrap();
        let err = verify_signature(SECRET, BODY, Some(&header)).unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }

    #[test]
    fn test_tampered_body_is_rejected() {
        let header = sign(SECRET, BODY).unwrap();
        let err = verify_signature(SECRET, b"{}", Some(&header)).unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }

    #[test]
    fn test_missing_and_malformed() {
        assert!(matches!(
            verify_signature(SECRET, BODY, None),
            Err(SignatureError::Missing)
        ));
        assert!(matches!(
            verify_signature(SECRET, BODY, Some("  ")),
            Err(SignatureError::Missing)
        ));
        assert!(matches!(
            verify_signature(SECRET, BODY, Some("sha256=zz")),
            Err(SignatureError::Malformed)
        ));
        assert!(matches!(
            verify_signature(SECRET, BODY, Some("sha256=abc")),
            Err(SignatureError::Malformed)
        ));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"token", b"token"));
        assert!(!constant_time_eq(b"token", b"tokem"));
        assert!(!constant_time_eq(b"token", b"token2"));
    }
}

//! Decoding of the claims embedded in the API's bearer tokens.
//!
//! The payload segment of the token is base64url-decoded and parsed as JSON.
//! No signature verification happens here: the role claim only gates the
//! client UX, and the server remains the actual authorization enforcement
//! point for every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::api::ApiError;

/// Role claim value required for an accepted session.
pub const ADMINISTRATOR_ROLE: &str = "ROLE_ADMINISTRADOR";

/// Claims this client cares about. Unknown claims are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl TokenClaims {
    pub fn is_administrator(&self) -> bool {
        self.role.as_deref() == Some(ADMINISTRATOR_ROLE)
    }
}

/// Decode the payload segment of a dot-separated bearer token.
///
/// A structurally malformed token is a `Decode` error; callers treat that
/// exactly like a role mismatch (deny, do not persist).
pub fn decode_claims(token: &str) -> Result<TokenClaims, ApiError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| ApiError::Decode("token has no payload segment".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| ApiError::Decode(format!("token payload is not valid base64: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::Decode(format!("token payload is not valid JSON: {e}")))
}

/// Build an unsigned token around the given claims JSON. Test helper only;
/// produced tokens have the same dot-separated shape the API returns.
#[cfg(test)]
pub(crate) fn encode_test_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.sig")
}

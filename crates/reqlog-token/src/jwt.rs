//! Unverified JWT payload decoding.
//!
//! The claims are read for observability only. No signature, expiry, issuer
//! or audience is checked, so nothing decoded here may be used to make an
//! access decision.

use jsonwebtoken::{decode, errors::Error as JsonWebTokenError, DecodingKey, Validation};
use serde_json::{Map, Value};
use tracing::debug;

/// Authorization schemes whose credential is treated as a JWT.
pub const BEARER_SCHEMES: [&str; 2] = ["Bearer", "JWT"];

/// Why a credential could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum JwtDecodeError {
    #[error("empty token")]
    Empty,

    #[error("failed to decode token: {0}")]
    Jwt(#[from] JsonWebTokenError),
}

/// Extract the raw token from an `Authorization` header value.
///
/// Returns an empty string unless the scheme is `Bearer` or `JWT` and a
/// credential follows it.
pub fn raw_token_from_header(header_value: &str) -> &str {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if BEARER_SCHEMES.contains(&scheme) => token,
        _ => "",
    }
}

/// Validation that only parses: no signature, expiry, audience or required claims.
fn claims_only() -> Validation {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();
    validation
}

/// Decode the claims of `token` without verifying it.
///
/// Padded base64url segments are accepted.
pub fn try_decode_jwt_payload(token: &str) -> Result<Map<String, Value>, JwtDecodeError> {
    if token.is_empty() {
        return Err(JwtDecodeError::Empty);
    }
    let unpadded = token
        .split('.')
        .map(|segment| segment.trim_end_matches('='))
        .collect::<Vec<_>>()
        .join(".");

    let data = decode::<Map<String, Value>>(&unpadded, &DecodingKey::from_secret(&[]), &claims_only())?;
    Ok(data.claims)
}

/// Decode the claims of `token`, or an empty mapping when anything is wrong.
pub fn decode_jwt_payload(token: &str) -> Map<String, Value> {
    match try_decode_jwt_payload(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "could not decode bearer token payload");
            Map::new()
        }
    }
}

/// Claims carried by an `Authorization` header value; empty for other schemes.
pub fn payload_from_authorization(header_value: &str) -> Map<String, Value> {
    decode_jwt_payload(raw_token_from_header(header_value))
}

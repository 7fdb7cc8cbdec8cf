//! # reqlog-token
//!
//! Best-effort extraction of JWT claims from `Authorization` headers, for
//! inclusion in request logs.
//!
//! Decoding never fails outward: a missing scheme, a malformed token or a
//! non-JSON payload all yield an empty claims mapping. Signatures are not
//! verified. This is telemetry, not authentication.

pub mod jwt;

pub use jwt::{
    decode_jwt_payload, payload_from_authorization, raw_token_from_header,
    try_decode_jwt_payload, JwtDecodeError, BEARER_SCHEMES,
};

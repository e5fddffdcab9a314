//! Bearer-token decoding into a session identity.
//!
//! TRUST MODEL
//! ===========
//! The payload is read without verifying the signature. The decoded identity
//! only drives which screens the UI offers; the API re-validates the token on
//! every request and answers 401 when it rejects it.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::collections::BTreeSet;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Deserialize;

use super::types::{Role, User};

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTokenError {
    #[error("token has {0} segments, expected 3")]
    SegmentCount(usize),
    #[error("token payload is not valid base64")]
    Base64,
    #[error("token payload is not valid JSON: {0}")]
    Json(String),
    #[error("token payload has no subject")]
    MissingSubject,
}

#[derive(Deserialize)]
struct Claims {
    sub: Option<String>,
    #[serde(default)]
    roles: Vec<String>,
}

/// Decode the claims segment of a `header.payload.signature` token.
///
/// # Errors
///
/// Returns [`MalformedTokenError`] when the token is not three segments or the
/// payload is not base64 JSON carrying a `sub` claim.
pub fn decode(token: &str) -> Result<User, MalformedTokenError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(MalformedTokenError::SegmentCount(segments.len()));
    }

    let payload = segments[1];
    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .map_err(|_| MalformedTokenError::Base64)?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| MalformedTokenError::Json(e.to_string()))?;

    let email = claims
        .sub
        .filter(|s| !s.trim().is_empty())
        .ok_or(MalformedTokenError::MissingSubject)?;
    // Unknown role names are dropped.
    let roles: BTreeSet<Role> = claims.roles.iter().filter_map(|r| r.parse().ok()).collect();

    Ok(User { email, roles })
}

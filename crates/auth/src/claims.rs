use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use idadmin_core::CustomClaims;

/// Claims that belong to the token format itself and are never surfaced as
/// custom claims.
const RESERVED_CLAIMS: &[&str] = &[
    "acr", "amr", "at_hash", "aud", "auth_time", "azp", "cnf", "c_hash", "exp", "firebase",
    "iat", "iss", "jti", "nbf", "nonce", "sub", "email", "email_verified", "user_id", "name",
    "picture", "phone_number",
];

/// ID token claims model (transport-agnostic).
///
/// Custom claims live at the top level of the token next to the standard
/// ones; everything not named here is collected into `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    /// Subject / uid of the caller.
    pub sub: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,

    /// Expiration, seconds since the Unix epoch.
    pub exp: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdTokenClaims {
    /// Custom claims carried by the token, with reserved claims filtered out.
    pub fn custom_claims(&self) -> CustomClaims {
        self.extra
            .iter()
            .filter(|(k, _)| !RESERVED_CLAIMS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token not yet valid (iat is in the future)")]
    NotYetValid,

    #[error("invalid token time window (exp <= iat)")]
    InvalidTimeWindow,

    #[error("token issuer does not match")]
    InvalidIssuer,

    #[error("token audience does not match")]
    InvalidAudience,

    #[error("token has no subject")]
    MissingSubject,
}

/// Deterministically validate the token's time window against `now`.
pub fn validate_time_window(iat: i64, exp: i64, now: DateTime<Utc>) -> Result<(), TokenError> {
    let now = now.timestamp();
    if exp <= iat {
        return Err(TokenError::InvalidTimeWindow);
    }
    if now < iat {
        return Err(TokenError::NotYetValid);
    }
    if now >= exp {
        return Err(TokenError::Expired);
    }
    Ok(())
}

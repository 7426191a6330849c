//! ID token verification.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};

use idadmin_core::UserUid;

use crate::{CallerIdentity, IdTokenClaims, TokenError, validate_time_window};

/// Verifies a caller's bearer token and exposes its identity and claims.
pub trait Authenticator: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<CallerIdentity, TokenError>;
}

/// HS256 verifier with a shared secret.
///
/// Issuer and audience are only checked when configured.
#[derive(Clone)]
pub struct Hs256Authenticator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256Authenticator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time window is checked against the caller-supplied `now`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.validation.set_issuer(&[issuer.into()]);
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.validation.set_audience(&[audience.into()]);
        self.validation.validate_aud = true;
        self
    }
}

impl Authenticator for Hs256Authenticator {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<CallerIdentity, TokenError> {
        let data = decode::<IdTokenClaims>(token, &self.key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "id token rejected");
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::ImmatureSignature => TokenError::NotYetValid,
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
                ErrorKind::InvalidAudience => TokenError::InvalidAudience,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;
        let claims = data.claims;

        validate_time_window(claims.iat, claims.exp, now)?;

        let uid = UserUid::new(claims.sub.clone()).map_err(|_| TokenError::MissingSubject)?;
        Ok(CallerIdentity::new(uid, claims.email.clone(), claims.custom_claims()))
    }
}

use serde::{Deserialize, Serialize};

use idadmin_core::{CustomClaims, UserUid};

/// Super-admin address used when none is configured.
pub const DEFAULT_SUPER_ADMIN_EMAIL: &str = "adminchi@gmail.com";

/// Identity of an authenticated caller, as established by an `Authenticator`.
///
/// Immutable for the duration of a call and passed explicitly into every
/// procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub uid: UserUid,
    pub email: Option<String>,
    pub claims: CustomClaims,
}

impl CallerIdentity {
    pub fn new(uid: UserUid, email: Option<String>, claims: CustomClaims) -> Self {
        Self { uid, email, claims }
    }

    pub fn is_admin(&self) -> bool {
        self.claims.is_admin()
    }

    /// Case-insensitive comparison of the caller's email against the super-admin.
    pub fn is_super_admin(&self, super_admin: &SuperAdmin) -> bool {
        self.email
            .as_deref()
            .is_some_and(|email| super_admin.matches(email))
    }
}

/// The single email address authorized for the most sensitive operations.
///
/// Stored lowercased; comparisons lowercase the other side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperAdmin(String);

impl SuperAdmin {
    pub fn new(email: impl AsRef<str>) -> Self {
        Self(email.as_ref().to_lowercase())
    }

    pub fn email(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, email: &str) -> bool {
        email.to_lowercase() == self.0
    }
}

impl Default for SuperAdmin {
    fn default() -> Self {
        Self::new(DEFAULT_SUPER_ADMIN_EMAIL)
    }
}

impl core::fmt::Display for SuperAdmin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

use thiserror::Error;

use idadmin_core::CallableError;

use crate::{CallerIdentity, SuperAdmin};

/// Message returned to callers without any identity.
pub const UNAUTHENTICATED_MESSAGE: &str = "User must be authenticated to call this function";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("caller is not authenticated")]
    Unauthenticated,

    #[error("caller email is not the super-admin address")]
    NotSuperAdmin,

    #[error("caller lacks the admin claim")]
    MissingAdminClaim,
}

impl AuthzError {
    /// Convert into the caller-facing error, using `denied` as the
    /// permission-denied message.
    pub fn into_callable(self, denied: &str) -> CallableError {
        match self {
            AuthzError::Unauthenticated => CallableError::unauthenticated(UNAUTHENTICATED_MESSAGE),
            AuthzError::NotSuperAdmin | AuthzError::MissingAdminClaim => {
                CallableError::permission_denied(denied)
            }
        }
    }
}

/// Require an authenticated caller whose email is the super-admin address.
///
/// Claims are ignored: an `admin: true` claim does not satisfy this policy.
pub fn require_super_admin<'a>(
    caller: Option<&'a CallerIdentity>,
    super_admin: &SuperAdmin,
) -> Result<&'a CallerIdentity, AuthzError> {
    let caller = caller.ok_or(AuthzError::Unauthenticated)?;
    if !caller.is_super_admin(super_admin) {
        return Err(AuthzError::NotSuperAdmin);
    }
    Ok(caller)
}

/// Require an authenticated caller carrying the `admin: true` claim.
///
/// Email is ignored.
pub fn require_admin_claim(caller: Option<&CallerIdentity>) -> Result<&CallerIdentity, AuthzError> {
    let caller = caller.ok_or(AuthzError::Unauthenticated)?;
    if !caller.is_admin() {
        return Err(AuthzError::MissingAdminClaim);
    }
    Ok(caller)
}

//! `idadmin-auth`: caller identity and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and from the directory.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod principal;

pub use authorize::{AuthzError, require_admin_claim, require_super_admin};
pub use claims::{IdTokenClaims, TokenError, validate_time_window};
pub use jwt::{Authenticator, Hs256Authenticator};
pub use principal::{CallerIdentity, DEFAULT_SUPER_ADMIN_EMAIL, SuperAdmin};

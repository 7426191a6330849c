//! `idadmin-core`: shared primitives for the admin account procedures.
//!
//! This crate contains **pure** types only (no IO, no transport).

pub mod claims;
pub mod error;
pub mod id;
pub mod result;

pub use claims::CustomClaims;
pub use error::{CallableError, CallableResult, ErrorCode};
pub use id::{EmptyUid, UserUid};
pub use result::CallResult;

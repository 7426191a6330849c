use axum::{Router, routing::post};

use idadmin_accounts::Procedure;

pub mod callable;
pub mod system;

/// Router for the callable procedures (behind the auth middleware).
pub fn router() -> Router {
    Router::new()
        .route(&path(Procedure::DeleteUser), post(callable::delete_user))
        .route(&path(Procedure::DeleteUserByUid), post(callable::delete_user_by_uid))
        .route(&path(Procedure::SetAdminClaim), post(callable::set_admin_claim))
}

/// Each procedure is served under its own name.
pub fn path(procedure: Procedure) -> String {
    format!("/{}", procedure.name())
}

//! The three admin account procedures.

use std::sync::Arc;

use serde_json::Value;

use idadmin_auth::{CallerIdentity, SuperAdmin, require_admin_claim, require_super_admin};
use idadmin_core::{CallResult, CallableError, CallableResult, CustomClaims, UserUid};
use idadmin_directory::{Directory, DirectoryError};

use crate::{Procedure, required_uid};

const DENIED_DELETE_SUPER_ADMIN: &str = "Only admin can delete users";
const DENIED_DELETE_ADMIN_CLAIM: &str = "Only admins can delete users";
const DENIED_SET_ADMIN_CLAIM: &str = "Only admin can grant admin claims";

const MSG_ALREADY_DELETED: &str = "User does not exist in Auth (may have been deleted already)";
const MSG_DELETED: &str = "User deleted successfully";
const MSG_ADMIN_CLAIM_SET: &str = "Admin claim set successfully";

/// Admin account operations over an injected directory.
///
/// Holds no mutable state; share it as `Arc<AdminAccountOps>` across tasks.
#[derive(Clone)]
pub struct AdminAccountOps {
    directory: Arc<dyn Directory>,
    super_admin: SuperAdmin,
}

impl AdminAccountOps {
    pub fn new(directory: Arc<dyn Directory>, super_admin: SuperAdmin) -> Self {
        Self {
            directory,
            super_admin,
        }
    }

    /// Dispatch by procedure.
    pub async fn invoke(
        &self,
        procedure: Procedure,
        caller: Option<&CallerIdentity>,
        data: &Value,
    ) -> CallableResult<CallResult> {
        match procedure {
            Procedure::DeleteUser => self.delete_user(caller, data).await,
            Procedure::DeleteUserByUid => self.delete_user_by_uid(caller, data).await,
            Procedure::SetAdminClaim => self.set_admin_claim(caller, data).await,
        }
    }

    /// Delete a user by `userId`. Super-admin email only.
    pub async fn delete_user(
        &self,
        caller: Option<&CallerIdentity>,
        data: &Value,
    ) -> CallableResult<CallResult> {
        let procedure = Procedure::DeleteUser;
        let caller = require_super_admin(caller, &self.super_admin)
            .map_err(|e| denied(procedure, caller, e.into_callable(DENIED_DELETE_SUPER_ADMIN)))?;
        let uid = required_uid(data, procedure.field())?;

        self.delete_idempotent(procedure, caller, &uid).await
    }

    /// Delete a user by `uid`. Any caller holding `admin: true`.
    pub async fn delete_user_by_uid(
        &self,
        caller: Option<&CallerIdentity>,
        data: &Value,
    ) -> CallableResult<CallResult> {
        let procedure = Procedure::DeleteUserByUid;
        let caller = require_admin_claim(caller)
            .map_err(|e| denied(procedure, caller, e.into_callable(DENIED_DELETE_ADMIN_CLAIM)))?;
        let uid = required_uid(data, procedure.field())?;

        self.delete_idempotent(procedure, caller, &uid).await
    }

    /// Replace the target's custom claims with exactly `{ admin: true }`.
    ///
    /// Super-admin email only; an admin claim on the caller is not enough.
    /// No existence check: a missing target surfaces as `internal`.
    pub async fn set_admin_claim(
        &self,
        caller: Option<&CallerIdentity>,
        data: &Value,
    ) -> CallableResult<CallResult> {
        let procedure = Procedure::SetAdminClaim;
        let caller = require_super_admin(caller, &self.super_admin)
            .map_err(|e| denied(procedure, caller, e.into_callable(DENIED_SET_ADMIN_CLAIM)))?;
        let uid = required_uid(data, procedure.field())?;

        match self
            .directory
            .set_custom_claims(&uid, CustomClaims::admin_only())
            .await
        {
            Ok(()) => {
                tracing::info!(procedure = %procedure, caller = %caller.uid, uid = %uid, "admin claim granted");
                Ok(CallResult::ok(MSG_ADMIN_CLAIM_SET))
            }
            Err(e) => Err(internal(procedure, &uid, "Failed to set admin claim", e)),
        }
    }

    /// Look up, then delete. An absent target counts as already deleted.
    async fn delete_idempotent(
        &self,
        procedure: Procedure,
        caller: &CallerIdentity,
        uid: &UserUid,
    ) -> CallableResult<CallResult> {
        match self.directory.get_user(uid).await {
            Ok(_) => {}
            Err(DirectoryError::NotFound(_)) => {
                tracing::info!(procedure = %procedure, caller = %caller.uid, uid = %uid, "user already absent");
                return Ok(CallResult::ok(MSG_ALREADY_DELETED));
            }
            Err(e) => return Err(internal(procedure, uid, "Failed to delete user", e)),
        }

        match self.directory.delete_user(uid).await {
            Ok(()) => {
                tracing::info!(procedure = %procedure, caller = %caller.uid, uid = %uid, "user deleted");
                Ok(CallResult::ok(MSG_DELETED))
            }
            // Removed between lookup and delete.
            Err(DirectoryError::NotFound(_)) => {
                tracing::info!(procedure = %procedure, caller = %caller.uid, uid = %uid, "user already absent");
                Ok(CallResult::ok(MSG_ALREADY_DELETED))
            }
            Err(e) => Err(internal(procedure, uid, "Failed to delete user", e)),
        }
    }
}

fn denied(
    procedure: Procedure,
    caller: Option<&CallerIdentity>,
    err: CallableError,
) -> CallableError {
    tracing::warn!(
        procedure = %procedure,
        caller = caller.map(|c| c.uid.as_str()).unwrap_or("<none>"),
        code = %err.code(),
        "call rejected"
    );
    err
}

fn internal(procedure: Procedure, uid: &UserUid, context: &str, err: DirectoryError) -> CallableError {
    tracing::error!(procedure = %procedure, uid = %uid, error = %err, "directory call failed");
    CallableError::internal(format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use idadmin_core::ErrorCode;
    use idadmin_directory::{InMemoryDirectory, UserRecord};
    use serde_json::json;

    /// Directory wrapper that counts mutating calls.
    #[derive(Default)]
    struct RecordingDirectory {
        inner: InMemoryDirectory,
        lookups: AtomicUsize,
        mutations: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Directory for RecordingDirectory {
        async fn get_user(&self, uid: &UserUid) -> Result<UserRecord, DirectoryError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get_user(uid).await
        }

        async fn delete_user(&self, uid: &UserUid) -> Result<(), DirectoryError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.inner.delete_user(uid).await
        }

        async fn set_custom_claims(
            &self,
            uid: &UserUid,
            claims: CustomClaims,
        ) -> Result<(), DirectoryError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.inner.set_custom_claims(uid, claims).await
        }
    }

    /// Directory whose lookup succeeds but whose delete reports `NotFound`.
    struct VanishingDirectory;

    #[async_trait::async_trait]
    impl Directory for VanishingDirectory {
        async fn get_user(&self, uid: &UserUid) -> Result<UserRecord, DirectoryError> {
            Ok(UserRecord::new(uid.clone()))
        }

        async fn delete_user(&self, uid: &UserUid) -> Result<(), DirectoryError> {
            Err(DirectoryError::NotFound(uid.clone()))
        }

        async fn set_custom_claims(
            &self,
            uid: &UserUid,
            _claims: CustomClaims,
        ) -> Result<(), DirectoryError> {
            Err(DirectoryError::NotFound(uid.clone()))
        }
    }

    fn setup() -> (Arc<RecordingDirectory>, AdminAccountOps) {
        let dir = Arc::new(RecordingDirectory::default());
        let ops = AdminAccountOps::new(dir.clone(), SuperAdmin::default());
        (dir, ops)
    }

    fn uid(s: &str) -> UserUid {
        UserUid::new(s).unwrap()
    }

    fn super_admin() -> CallerIdentity {
        CallerIdentity::new(uid("sa"), Some("AdminChi@Gmail.com".to_string()), CustomClaims::new())
    }

    fn claim_admin() -> CallerIdentity {
        CallerIdentity::new(uid("ca"), None, CustomClaims::admin_only())
    }

    fn nobody() -> CallerIdentity {
        let mut claims = CustomClaims::new();
        claims.insert("admin", json!(false));
        CallerIdentity::new(uid("nb"), Some("someone@example.com".to_string()), claims)
    }

    fn payload(procedure: Procedure, value: &str) -> Value {
        json!({ procedure.field(): value })
    }

    #[tokio::test]
    async fn unauthenticated_for_every_procedure_and_payload() {
        let (dir, ops) = setup();
        dir.inner.insert(UserRecord::new(uid("u1")));

        for procedure in Procedure::ALL {
            for data in [payload(procedure, "u1"), json!({}), json!(null)] {
                let err = ops.invoke(procedure, None, &data).await.unwrap_err();
                assert_eq!(err.code(), ErrorCode::Unauthenticated, "{procedure}");
            }
        }

        assert_eq!(dir.lookups.load(Ordering::SeqCst), 0);
        assert_eq!(dir.mutations.load(Ordering::SeqCst), 0);
        assert!(dir.inner.contains(&uid("u1")));
    }

    #[tokio::test]
    async fn permission_denied_even_with_valid_input() {
        let (dir, ops) = setup();
        dir.inner.insert(UserRecord::new(uid("u1")));
        let caller = nobody();

        for procedure in Procedure::ALL {
            let err = ops
                .invoke(procedure, Some(&caller), &payload(procedure, "u1"))
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::PermissionDenied, "{procedure}");
        }

        assert_eq!(dir.mutations.load(Ordering::SeqCst), 0);
        assert!(dir.inner.contains(&uid("u1")));
    }

    #[tokio::test]
    async fn permission_checks_precede_input_validation() {
        let (_dir, ops) = setup();
        let err = ops
            .delete_user(Some(&nobody()), &json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PermissionDenied);
    }

    #[tokio::test]
    async fn each_procedure_checks_its_own_policy() {
        let (dir, ops) = setup();
        dir.inner.insert(UserRecord::new(uid("u1")));

        // The super-admin email without the claim cannot use the claim-gated delete.
        let err = ops
            .delete_user_by_uid(Some(&super_admin()), &json!({ "uid": "u1" }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PermissionDenied);
        assert_eq!(err.message(), "Only admins can delete users");

        // The claim alone does not grant email-gated procedures.
        let err = ops
            .delete_user(Some(&claim_admin()), &json!({ "userId": "u1" }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PermissionDenied);
        assert_eq!(err.message(), "Only admin can delete users");

        let err = ops
            .set_admin_claim(Some(&claim_admin()), &json!({ "uid": "u1" }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PermissionDenied);
        assert_eq!(err.message(), "Only admin can grant admin claims");

        assert_eq!(dir.mutations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_argument_for_bad_fields() {
        let (dir, ops) = setup();
        let sa = super_admin();
        let ca = claim_admin();

        for procedure in Procedure::ALL {
            let caller = match procedure {
                Procedure::DeleteUserByUid => &ca,
                _ => &sa,
            };
            let field = procedure.field();
            for data in [
                json!({}),
                json!({ field: null }),
                json!({ field: 7 }),
                json!({ field: "" }),
            ] {
                let err = ops.invoke(procedure, Some(caller), &data).await.unwrap_err();
                assert_eq!(err.code(), ErrorCode::InvalidArgument, "{procedure} {data}");
            }
        }

        assert_eq!(dir.lookups.load(Ordering::SeqCst), 0);
        assert_eq!(dir.mutations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn delete_of_absent_user_reports_success() {
        let (dir, ops) = setup();

        let res = ops
            .delete_user(Some(&super_admin()), &json!({ "userId": "u123" }))
            .await
            .unwrap();
        assert!(res.success);
        assert!(res.message.contains("not exist"));
        assert_eq!(dir.mutations.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn claim_admin_deletes_existing_user() {
        let (dir, ops) = setup();
        dir.inner.insert(UserRecord::new(uid("u456")));

        let res = ops
            .delete_user_by_uid(Some(&claim_admin()), &json!({ "uid": "u456" }))
            .await
            .unwrap();
        assert!(res.success);
        assert!(res.message.contains("deleted successfully"));
        assert!(!dir.inner.contains(&uid("u456")));
        assert_eq!(dir.mutations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn repeated_delete_is_idempotent() {
        let (dir, ops) = setup();
        dir.inner.insert(UserRecord::new(uid("u1")));
        dir.inner.insert(UserRecord::new(uid("u2")));

        let first = ops
            .delete_user(Some(&super_admin()), &json!({ "userId": "u1" }))
            .await
            .unwrap();
        let second = ops
            .delete_user(Some(&super_admin()), &json!({ "userId": "u1" }))
            .await
            .unwrap();
        assert!(first.success && second.success);
        assert!(first.message.contains("deleted successfully"));
        assert!(second.message.contains("not exist"));

        let first = ops
            .delete_user_by_uid(Some(&claim_admin()), &json!({ "uid": "u2" }))
            .await
            .unwrap();
        let second = ops
            .delete_user_by_uid(Some(&claim_admin()), &json!({ "uid": "u2" }))
            .await
            .unwrap();
        assert!(first.success && second.success);
        assert!(dir.inner.is_empty());
    }

    #[tokio::test]
    async fn target_vanishing_before_delete_is_still_success() {
        let ops = AdminAccountOps::new(Arc::new(VanishingDirectory), SuperAdmin::default());
        let res = ops
            .delete_user(Some(&super_admin()), &json!({ "userId": "u1" }))
            .await
            .unwrap();
        assert!(res.success);
        assert_eq!(res.message, MSG_ALREADY_DELETED);
    }

    #[tokio::test]
    async fn directory_failures_surface_as_internal_with_detail() {
        let (dir, ops) = setup();
        dir.inner.insert(UserRecord::new(uid("u1")));
        dir.inner.fail_with(Some("connection reset"));

        let err = ops
            .delete_user(Some(&super_admin()), &json!({ "userId": "u1" }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.message(), "Failed to delete user: connection reset");

        let err = ops
            .delete_user_by_uid(Some(&claim_admin()), &json!({ "uid": "u1" }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal);

        let err = ops
            .set_admin_claim(Some(&super_admin()), &json!({ "uid": "u1" }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(err.message(), "Failed to set admin claim: connection reset");
    }

    #[tokio::test]
    async fn set_admin_claim_replaces_existing_claims() {
        let (dir, ops) = setup();
        let mut prior = CustomClaims::new();
        prior.insert("foo", json!(1));
        dir.inner.insert(UserRecord::new(uid("u1")).with_claims(prior));

        let res = ops
            .set_admin_claim(Some(&super_admin()), &json!({ "uid": "u1" }))
            .await
            .unwrap();
        assert!(res.success);

        let rec = dir.inner.get_user(&uid("u1")).await.unwrap();
        assert_eq!(
            serde_json::to_value(&rec.custom_claims).unwrap(),
            json!({ "admin": true })
        );
    }

    #[tokio::test]
    async fn set_admin_claim_on_absent_user_is_internal() {
        let (_dir, ops) = setup();
        let err = ops
            .set_admin_claim(Some(&super_admin()), &json!({ "uid": "ghost" }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal);
        assert!(err.message().starts_with("Failed to set admin claim:"));
    }
}

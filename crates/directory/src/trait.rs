use std::sync::Arc;

use thiserror::Error;

use idadmin_core::{CustomClaims, UserUid};

use crate::UserRecord;

/// Directory operation error.
///
/// The split is deliberately closed: callers only need to tell "the target
/// does not exist" apart from everything else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("no user record corresponding to the provided identifier ({0})")]
    NotFound(UserUid),

    #[error("{0}")]
    Other(String),
}

impl DirectoryError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}

/// User directory capability (hosted identity provider or a local fake).
///
/// ## Semantics
///
/// - `get_user` returns `NotFound` for an absent identifier.
/// - `delete_user` removes exactly one record.
/// - `set_custom_claims` **replaces** the whole claim map of the target.
///
/// Implementations do not retry; a single failure is returned as is.
#[async_trait::async_trait]
pub trait Directory: Send + Sync {
    async fn get_user(&self, uid: &UserUid) -> Result<UserRecord, DirectoryError>;

    async fn delete_user(&self, uid: &UserUid) -> Result<(), DirectoryError>;

    async fn set_custom_claims(
        &self,
        uid: &UserUid,
        claims: CustomClaims,
    ) -> Result<(), DirectoryError>;
}

#[async_trait::async_trait]
impl<D> Directory for Arc<D>
where
    D: Directory + ?Sized,
{
    async fn get_user(&self, uid: &UserUid) -> Result<UserRecord, DirectoryError> {
        (**self).get_user(uid).await
    }

    async fn delete_user(&self, uid: &UserUid) -> Result<(), DirectoryError> {
        (**self).delete_user(uid).await
    }

    async fn set_custom_claims(
        &self,
        uid: &UserUid,
        claims: CustomClaims,
    ) -> Result<(), DirectoryError> {
        (**self).set_custom_claims(uid, claims).await
    }
}

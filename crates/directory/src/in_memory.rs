use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use idadmin_core::{CustomClaims, UserUid};

use crate::{Directory, DirectoryError, UserRecord};

/// In-memory user directory.
///
/// Intended for tests/dev. A failure can be injected with [`fail_with`] to
/// exercise the error paths of callers.
///
/// [`fail_with`]: InMemoryDirectory::fail_with
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<HashMap<UserUid, UserRecord>>,
    failure: RwLock<Option<String>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or overwrite) a record.
    pub fn insert(&self, record: UserRecord) {
        self.users
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.uid.clone(), record);
    }

    pub fn contains(&self, uid: &UserUid) -> bool {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(uid)
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every subsequent operation fail with `Other(message)`;
    /// `None` clears the failure.
    pub fn fail_with(&self, message: Option<&str>) {
        *self.failure.write().unwrap_or_else(PoisonError::into_inner) = message.map(str::to_string);
    }

    fn check_failure(&self) -> Result<(), DirectoryError> {
        let failure = self
            .failure
            .read()
            .map_err(|_| DirectoryError::other("lock poisoned"))?;
        match failure.as_deref() {
            Some(msg) => Err(DirectoryError::other(msg)),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Directory for InMemoryDirectory {
    async fn get_user(&self, uid: &UserUid) -> Result<UserRecord, DirectoryError> {
        self.check_failure()?;
        let users = self
            .users
            .read()
            .map_err(|_| DirectoryError::other("lock poisoned"))?;
        users
            .get(uid)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(uid.clone()))
    }

    async fn delete_user(&self, uid: &UserUid) -> Result<(), DirectoryError> {
        self.check_failure()?;
        let mut users = self
            .users
            .write()
            .map_err(|_| DirectoryError::other("lock poisoned"))?;
        users
            .remove(uid)
            .map(|_| ())
            .ok_or_else(|| DirectoryError::NotFound(uid.clone()))
    }

    async fn set_custom_claims(
        &self,
        uid: &UserUid,
        claims: CustomClaims,
    ) -> Result<(), DirectoryError> {
        self.check_failure()?;
        let mut users = self
            .users
            .write()
            .map_err(|_| DirectoryError::other("lock poisoned"))?;
        let record = users
            .get_mut(uid)
            .ok_or_else(|| DirectoryError::NotFound(uid.clone()))?;
        record.custom_claims = claims;
        Ok(())
    }
}

//! Strongly-typed user identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identifier of a user record in the directory.
///
/// The directory owns the format; the only local invariant is that the
/// identifier is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserUid(String);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("user identifier must be a non-empty string")]
pub struct EmptyUid;

impl UserUid {
    pub fn new(uid: impl Into<String>) -> Result<Self, EmptyUid> {
        let uid = uid.into();
        if uid.is_empty() {
            return Err(EmptyUid);
        }
        Ok(Self(uid))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for UserUid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserUid {
    type Error = EmptyUid;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserUid> for String {
    fn from(value: UserUid) -> Self {
        value.0
    }
}

impl FromStr for UserUid {
    type Err = EmptyUid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

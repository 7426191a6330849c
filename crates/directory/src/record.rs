use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use idadmin_core::{CustomClaims, UserUid};

/// A user record as stored by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub uid: UserUid,
    pub email: Option<String>,
    pub disabled: bool,
    pub custom_claims: CustomClaims,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn new(uid: UserUid) -> Self {
        Self {
            uid,
            email: None,
            disabled: false,
            custom_claims: CustomClaims::new(),
            created_at: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_claims(mut self, claims: CustomClaims) -> Self {
        self.custom_claims = claims;
        self
    }
}

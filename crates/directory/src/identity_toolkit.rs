//! Identity Toolkit REST client.
//!
//! Talks to the hosted identity provider's admin API:
//! - `accounts:lookup` for reads
//! - `accounts:delete` for deletion
//! - `accounts:update` with `customAttributes` for claim assignment
//!
//! Errors carrying `USER_NOT_FOUND` map to [`DirectoryError::NotFound`];
//! every other failure becomes [`DirectoryError::Other`]. No retries.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use idadmin_core::{CustomClaims, UserUid};

use crate::{Directory, DirectoryError, UserRecord};

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_NOT_FOUND: &str = "USER_NOT_FOUND";

/// Directory backed by the Identity Toolkit admin REST API.
#[derive(Debug, Clone)]
pub struct IdentityToolkitDirectory {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    access_token: String,
}

impl IdentityToolkitDirectory {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DirectoryError::other(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            access_token: access_token.into(),
        })
    }

    fn endpoint(&self, op: &str) -> String {
        format!(
            "{}/v1/projects/{}/accounts:{}",
            self.base_url, self.project_id, op
        )
    }

    async fn call<B: Serialize + Sync>(
        &self,
        op: &str,
        uid: &UserUid,
        body: &B,
    ) -> Result<Value, DirectoryError> {
        let res = self
            .client
            .post(self.endpoint(op))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await
            .map_err(|e| DirectoryError::other(format!("accounts:{op} request failed: {e}")))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| DirectoryError::other(format!("accounts:{op} read failed: {e}")))?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| {
                DirectoryError::other(format!("accounts:{op} returned invalid json: {e}"))
            });
        }

        match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(err) if err.error.message.starts_with(USER_NOT_FOUND) => {
                Err(DirectoryError::NotFound(uid.clone()))
            }
            Ok(err) => Err(DirectoryError::other(format!(
                "accounts:{op} failed ({status}): {}",
                err.error.message
            ))),
            Err(_) => Err(DirectoryError::other(format!(
                "accounts:{op} failed ({status}): {text}"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    local_id: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<RawUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    disabled: bool,
    #[serde(default)]
    custom_attributes: Option<String>,
    /// Milliseconds since the epoch, as a decimal string.
    #[serde(default)]
    created_at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    local_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateClaimsRequest<'a> {
    local_id: &'a str,
    /// JSON-encoded claim map; the provider stores it verbatim.
    custom_attributes: String,
}

impl RawUser {
    fn into_record(self) -> Result<UserRecord, DirectoryError> {
        let uid = UserUid::new(self.local_id)
            .map_err(|_| DirectoryError::other("lookup returned a user without localId"))?;

        let custom_claims = decode_custom_attributes(&uid, self.custom_attributes.as_deref());

        let created_at = self
            .created_at
            .as_deref()
            .and_then(|ms| ms.parse::<i64>().ok())
            .and_then(DateTime::<Utc>::from_timestamp_millis);

        Ok(UserRecord {
            uid,
            email: self.email,
            disabled: self.disabled,
            custom_claims,
            created_at,
        })
    }
}

/// Decode the stored claim map. An unreadable value must not hide the user
/// itself, so anything other than a JSON object reads as no claims.
fn decode_custom_attributes(uid: &UserUid, raw: Option<&str>) -> CustomClaims {
    let raw = match raw.map(str::trim) {
        None | Some("") => return CustomClaims::new(),
        Some(raw) => raw,
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => CustomClaims::from(map),
        Ok(Value::Null) => CustomClaims::new(),
        Ok(other) => {
            tracing::warn!(uid = %uid, value = %other, "customAttributes is not an object; ignoring");
            CustomClaims::new()
        }
        Err(e) => {
            tracing::warn!(uid = %uid, error = %e, "customAttributes is not valid json; ignoring");
            CustomClaims::new()
        }
    }
}

#[async_trait::async_trait]
impl Directory for IdentityToolkitDirectory {
    async fn get_user(&self, uid: &UserUid) -> Result<UserRecord, DirectoryError> {
        let body = LookupRequest {
            local_id: [uid.as_str()],
        };
        let value = self.call("lookup", uid, &body).await?;

        let res: LookupResponse = serde_json::from_value(value)
            .map_err(|e| DirectoryError::other(format!("unexpected lookup response: {e}")))?;

        match res.users.into_iter().next() {
            Some(user) => user.into_record(),
            None => Err(DirectoryError::NotFound(uid.clone())),
        }
    }

    async fn delete_user(&self, uid: &UserUid) -> Result<(), DirectoryError> {
        let body = DeleteRequest {
            local_id: uid.as_str(),
        };
        self.call("delete", uid, &body).await?;
        tracing::debug!(uid = %uid, "identity toolkit user deleted");
        Ok(())
    }

    async fn set_custom_claims(
        &self,
        uid: &UserUid,
        claims: CustomClaims,
    ) -> Result<(), DirectoryError> {
        let custom_attributes = serde_json::to_string(&claims)
            .map_err(|e| DirectoryError::other(format!("failed to encode claims: {e}")))?;
        let body = UpdateClaimsRequest {
            local_id: uid.as_str(),
            custom_attributes,
        };
        self.call("update", uid, &body).await?;
        tracing::debug!(uid = %uid, "identity toolkit custom claims replaced");
        Ok(())
    }
}

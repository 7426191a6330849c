//! Request payload validation.

use serde_json::Value;

use idadmin_core::{CallableError, CallableResult, UserUid};

pub const FIELD_USER_ID: &str = "userId";
pub const FIELD_UID: &str = "uid";

/// Extract a required, non-empty string identifier from the payload.
///
/// Missing fields, `null`, empty strings and non-string values are all
/// rejected as `invalid-argument`. A payload that is not an object has no
/// fields at all.
pub fn required_uid(data: &Value, field: &str) -> CallableResult<UserUid> {
    match data.get(field) {
        Some(Value::String(s)) if !s.is_empty() => UserUid::new(s.as_str())
            .map_err(|_| invalid(field)),
        _ => Err(invalid(field)),
    }
}

fn invalid(field: &str) -> CallableError {
    CallableError::invalid_argument(format!("{field} must be provided as a string"))
}

//! Callable wire envelopes.
//!
//! Request:  `{"data": <payload>}`
//! Success:  `{"result": {"success": true, "message": "..."}}`
//! Error:    `{"error": {"status": "PERMISSION_DENIED", "message": "..."}}`

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use idadmin_core::{CallResult, ErrorCode};

use crate::app::errors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableResponse {
    pub result: CallResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableErrorBody {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableErrorEnvelope {
    pub error: CallableErrorBody,
}

/// Extract the `data` payload from a raw request body.
///
/// The body must be a JSON object with a `data` member (which may be `null`).
pub fn parse_callable_body(body: &[u8]) -> Result<Value, axum::response::Response> {
    let bad_request =
        || errors::json_error(StatusCode::BAD_REQUEST, ErrorCode::InvalidArgument, "Bad Request");

    let value: Value = serde_json::from_slice(body).map_err(|_| bad_request())?;
    match value {
        Value::Object(mut obj) => obj.remove("data").ok_or_else(bad_request),
        _ => Err(bad_request()),
    }
}

use axum::http::StatusCode;
use axum::response::IntoResponse;

use idadmin_core::{CallableError, ErrorCode};

use crate::app::dto::{CallableErrorBody, CallableErrorEnvelope};

/// HTTP status for each callable error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorCode::PermissionDenied => StatusCode::FORBIDDEN,
        ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn callable_error_to_response(err: CallableError) -> axum::response::Response {
    json_error(status_for(err.code()), err.code(), err.message())
}

pub fn json_error(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(CallableErrorEnvelope {
            error: CallableErrorBody {
                status: code.status().to_string(),
                message: message.into(),
            },
        }),
    )
        .into_response()
}

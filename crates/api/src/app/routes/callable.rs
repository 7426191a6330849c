use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use idadmin_accounts::{AdminAccountOps, Procedure};

use crate::app::{dto, errors};
use crate::context::CallerContext;

/// POST /deleteUser
pub async fn delete_user(
    Extension(ops): Extension<Arc<AdminAccountOps>>,
    Extension(ctx): Extension<CallerContext>,
    body: Bytes,
) -> Response {
    call(Procedure::DeleteUser, &ops, &ctx, &body).await
}

/// POST /deleteUserByUid
pub async fn delete_user_by_uid(
    Extension(ops): Extension<Arc<AdminAccountOps>>,
    Extension(ctx): Extension<CallerContext>,
    body: Bytes,
) -> Response {
    call(Procedure::DeleteUserByUid, &ops, &ctx, &body).await
}

/// POST /setAdminClaim
pub async fn set_admin_claim(
    Extension(ops): Extension<Arc<AdminAccountOps>>,
    Extension(ctx): Extension<CallerContext>,
    body: Bytes,
) -> Response {
    call(Procedure::SetAdminClaim, &ops, &ctx, &body).await
}

async fn call(
    procedure: Procedure,
    ops: &AdminAccountOps,
    ctx: &CallerContext,
    body: &[u8],
) -> Response {
    let data = match dto::parse_callable_body(body) {
        Ok(data) => data,
        Err(res) => return res,
    };

    match ops.invoke(procedure, ctx.caller(), &data).await {
        Ok(result) => (StatusCode::OK, Json(dto::CallableResponse { result })).into_response(),
        Err(e) => errors::callable_error_to_response(e),
    }
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use idadmin_auth::Authenticator;
use idadmin_core::ErrorCode;

use crate::app::errors::json_error;
use crate::context::CallerContext;

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<dyn Authenticator>,
}

/// Resolve the caller identity from the bearer token, if any.
///
/// No `Authorization` header → anonymous caller. A header that is present but
/// unusable, or a token the authenticator rejects → 401 before the procedure
/// runs.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let context = match extract_bearer(req.headers()) {
        Ok(None) => CallerContext::anonymous(),
        Ok(Some(token)) => {
            let caller = state.authenticator.verify(token, Utc::now()).map_err(|e| {
                tracing::info!(error = %e, "bearer token rejected");
                unauthenticated()
            })?;
            CallerContext::authenticated(caller)
        }
        Err(()) => return Err(unauthenticated()),
    };

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

fn unauthenticated() -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        ErrorCode::Unauthenticated,
        "Unauthenticated",
    )
}

fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, ()> {
    let Some(header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let header = header.to_str().map_err(|_| ())?;
    let token = header.strip_prefix("Bearer ").ok_or(())?.trim();
    if token.is_empty() {
        return Err(());
    }

    Ok(Some(token))
}

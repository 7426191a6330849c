//! HTTP application wiring (Axum router + capability wiring).
//!
//! - `routes/`: callable endpoints and health
//! - `dto.rs`: callable request/response envelopes
//! - `errors.rs`: error code → HTTP status/envelope mapping

use std::sync::Arc;

use anyhow::Context;
use axum::{Extension, Router, routing::get};

use idadmin_accounts::AdminAccountOps;
use idadmin_auth::{Authenticator, Hs256Authenticator};
use idadmin_directory::{Directory, IdentityToolkitDirectory, InMemoryDirectory};

use crate::config::{ApiConfig, DirectoryBackend};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the router around already-constructed capabilities.
pub fn build_app(ops: Arc<AdminAccountOps>, authenticator: Arc<dyn Authenticator>) -> Router {
    let auth_state = middleware::AuthState { authenticator };

    // Callable routes: caller identity resolved from the bearer token.
    let callable = routes::router()
        .layer(Extension(ops))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(callable)
}

/// Build the router from configuration (public entrypoint used by `main.rs`).
pub fn build_from_config(config: &ApiConfig) -> anyhow::Result<Router> {
    let directory: Arc<dyn Directory> = match &config.directory {
        DirectoryBackend::InMemory => {
            tracing::warn!("using in-memory directory; records are lost on restart");
            Arc::new(InMemoryDirectory::new())
        }
        DirectoryBackend::IdentityToolkit {
            base_url,
            project_id,
            access_token,
            timeout,
        } => Arc::new(
            IdentityToolkitDirectory::new(
                base_url.as_str(),
                project_id.as_str(),
                access_token.as_str(),
                *timeout,
            )
            .context("failed to construct identity toolkit directory")?,
        ),
    };

    let mut authenticator = Hs256Authenticator::new(config.jwt_secret.as_bytes());
    if let Some(issuer) = &config.jwt_issuer {
        authenticator = authenticator.with_issuer(issuer.as_str());
    }
    if let Some(audience) = &config.jwt_audience {
        authenticator = authenticator.with_audience(audience.as_str());
    }

    let ops = Arc::new(AdminAccountOps::new(directory, config.super_admin.clone()));
    Ok(build_app(ops, Arc::new(authenticator)))
}

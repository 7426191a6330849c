//! Environment-driven configuration.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use idadmin_auth::{DEFAULT_SUPER_ADMIN_EMAIL, SuperAdmin};
use idadmin_directory::identity_toolkit;
use idadmin_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Which directory implementation backs the procedures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryBackend {
    /// Process-local directory (dev only; starts empty).
    InMemory,
    IdentityToolkit {
        base_url: String,
        project_id: String,
        access_token: String,
        timeout: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub super_admin: SuperAdmin,
    pub jwt_secret: String,
    /// `true` when `JWT_SECRET` was not provided and the dev default is in use.
    pub insecure_default_secret: bool,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    pub directory: DirectoryBackend,
    pub log_format: LogFormat,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                var: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let super_admin_email =
            var("SUPER_ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_SUPER_ADMIN_EMAIL.to_string());
        if !super_admin_email.contains('@') {
            return Err(ConfigError::InvalidValue {
                var: "SUPER_ADMIN_EMAIL",
                reason: format!("'{super_admin_email}' is not an email address"),
            });
        }

        let (jwt_secret, insecure_default_secret) = match var("JWT_SECRET") {
            Some(secret) => (secret, false),
            None => (DEV_JWT_SECRET.to_string(), true),
        };

        let log_format = match var("LOG_FORMAT") {
            Some(v) => v.parse::<LogFormat>().map_err(|e| ConfigError::InvalidValue {
                var: "LOG_FORMAT",
                reason: e.to_string(),
            })?,
            None => LogFormat::default(),
        };

        let directory = match var("DIRECTORY_BACKEND").as_deref() {
            None | Some("memory") => DirectoryBackend::InMemory,
            Some("identity-toolkit") => {
                let timeout = match var("IDENTITY_TOOLKIT_TIMEOUT_SECS") {
                    Some(v) => Duration::from_secs(v.parse::<u64>().map_err(|e| {
                        ConfigError::InvalidValue {
                            var: "IDENTITY_TOOLKIT_TIMEOUT_SECS",
                            reason: e.to_string(),
                        }
                    })?),
                    None => identity_toolkit::DEFAULT_TIMEOUT,
                };
                DirectoryBackend::IdentityToolkit {
                    base_url: var("IDENTITY_TOOLKIT_URL")
                        .unwrap_or_else(|| identity_toolkit::DEFAULT_BASE_URL.to_string()),
                    project_id: var("IDENTITY_TOOLKIT_PROJECT_ID")
                        .ok_or(ConfigError::MissingVar("IDENTITY_TOOLKIT_PROJECT_ID"))?,
                    access_token: var("IDENTITY_TOOLKIT_ACCESS_TOKEN")
                        .ok_or(ConfigError::MissingVar("IDENTITY_TOOLKIT_ACCESS_TOKEN"))?,
                    timeout,
                }
            }
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    var: "DIRECTORY_BACKEND",
                    reason: format!("'{other}' (expected 'memory' or 'identity-toolkit')"),
                });
            }
        };

        Ok(Self {
            bind_addr,
            super_admin: SuperAdmin::new(super_admin_email),
            jwt_secret,
            insecure_default_secret,
            jwt_issuer: var("JWT_ISSUER"),
            jwt_audience: var("JWT_AUDIENCE"),
            directory,
            log_format,
        })
    }
}

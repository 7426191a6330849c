//! HTTP API: callable endpoints, caller authentication and configuration.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

//! Tracing/logging setup shared by the binaries.

pub mod subscriber;

pub use subscriber::{LogFormat, UnknownLogFormat, init, init_with};

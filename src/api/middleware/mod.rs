//! HTTP middleware for request processing and protection.

pub mod auth;
pub mod cors;
pub mod process_time;
pub mod rate_limit;
pub mod tracing;

//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the interfaces the domain and application
//! layers depend on.
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`email`] - Outbound email delivery
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`security`] - Password hashing and JWT handling

pub mod cache;
pub mod email;
pub mod persistence;
pub mod security;

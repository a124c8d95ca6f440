//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization and `validator` for input validation.

pub mod auth;
pub mod comment;
pub mod contact;
pub mod health;
pub mod image;
pub mod pagination;
pub mod user;

//! Credential primitives: password hashing and signed tokens.

pub mod jwt;
pub mod password_hasher;

pub use jwt::{Claims, TokenCodec, TokenError, TokenLifetimes, TokenScope};
pub use password_hasher::{HashError, PasswordHasher};

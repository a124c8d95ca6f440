//! Repository trait for user accounts.

use crate::domain::entities::{NewUser, Role, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing users.
///
/// Mutating methods return [`AppError::NotFound`] when no row matches `id`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Lists all users ordered by id.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Counts all users. Also used by the database health check.
    async fn count(&self) -> Result<i64, AppError>;

    /// Stores or clears the current refresh token.
    async fn update_refresh_token(&self, id: i64, token: Option<String>) -> Result<(), AppError>;

    async fn confirm_email(&self, id: i64) -> Result<(), AppError>;

    /// Sets `is_password_valid`; `false` marks a reset in progress.
    async fn set_password_valid(&self, id: i64, valid: bool) -> Result<(), AppError>;

    /// Replaces the password hash, marks the password valid and clears the refresh token.
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError>;

    /// Replaces the username and, when given, the avatar.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    async fn update_profile(
        &self,
        id: i64,
        username: &str,
        avatar: Option<String>,
    ) -> Result<User, AppError>;

    async fn set_role(&self, id: i64, role: Role) -> Result<User, AppError>;

    /// Activates or deactivates an account. Deactivation clears the refresh token.
    async fn set_active(&self, id: i64, active: bool) -> Result<User, AppError>;
}

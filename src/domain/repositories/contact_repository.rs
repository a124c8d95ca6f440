//! Repository trait for contacts.

use crate::domain::entities::{Contact, ContactData, ContactFilter};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for a user's contact book.
///
/// Every lookup is scoped by `user_id`: a contact owned by another user is
/// indistinguishable from a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Lists contacts matching `filter`, ordered by id.
    async fn list(
        &self,
        user_id: i64,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError>;

    /// Lists every contact of a user, ordered by id.
    async fn list_all(&self, user_id: i64) -> Result<Vec<Contact>, AppError>;

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Contact>, AppError>;

    /// Creates a contact.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has a contact with
    /// the same email or phone.
    async fn create(&self, user_id: i64, data: ContactData) -> Result<Contact, AppError>;

    /// Replaces all writable fields. Returns `Ok(None)` if not found.
    async fn update(
        &self,
        user_id: i64,
        id: i64,
        data: ContactData,
    ) -> Result<Option<Contact>, AppError>;

    /// Deletes a contact. Returns `Ok(false)` if not found.
    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError>;

    /// Counts all contacts across users.
    async fn count(&self) -> Result<i64, AppError>;
}

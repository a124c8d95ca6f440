//! Repository trait for image records and their tags.

use crate::domain::entities::{Image, NewImage};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for images.
///
/// Reads are open to every user. Writes are scoped by owner, so an image
/// owned by someone else behaves as missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Stores an image without tags.
    async fn create(&self, user_id: i64, image: NewImage) -> Result<Image, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Image>, AppError>;

    /// Lists a user's images, newest first.
    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Image>, AppError>;

    /// Replaces the description. Returns `Ok(None)` if not found.
    async fn update_description(
        &self,
        user_id: i64,
        id: i64,
        description: Option<String>,
    ) -> Result<Option<Image>, AppError>;

    /// Deletes an image with its comments, ratings and tag links.
    /// Returns `Ok(false)` if not found.
    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError>;

    /// Links a tag to an image. Linking twice is a no-op.
    async fn attach_tag(&self, image_id: i64, tag_id: i64) -> Result<(), AppError>;

    /// Unlinks a tag. Returns `Ok(false)` if it was not linked.
    async fn detach_tag(&self, image_id: i64, tag_id: i64) -> Result<bool, AppError>;

    /// Counts all images across users.
    async fn count(&self) -> Result<i64, AppError>;
}

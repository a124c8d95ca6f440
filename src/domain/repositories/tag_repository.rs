//! Repository trait for tags.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists tags ordered by title, optionally those containing `search`.
    async fn list(
        &self,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Tag>, AppError>;

    /// Looks up a tag by its normalized title.
    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, AppError>;

    /// Creates a tag, or returns the existing one with the same title.
    async fn find_or_create(&self, title: &str, user_id: i64) -> Result<Tag, AppError>;

    /// Deletes a tag and unlinks it from every image. Returns `Ok(false)` if not found.
    async fn delete(&self, title: &str) -> Result<bool, AppError>;
}

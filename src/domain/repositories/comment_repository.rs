//! Repository trait for comments.

use crate::domain::entities::{Comment, NewComment};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for comments. Lists are ordered oldest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(&self, comment: NewComment) -> Result<Comment, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Comment>, AppError>;

    /// Top-level comments of an image.
    async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError>;

    /// Replies to a comment.
    async fn list_replies(
        &self,
        parent_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError>;

    /// Every comment written by a user, replies included.
    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError>;

    /// Replaces the text of the author's own comment. Returns `Ok(None)` if
    /// not found or written by someone else.
    async fn update_text(
        &self,
        user_id: i64,
        id: i64,
        text: &str,
    ) -> Result<Option<Comment>, AppError>;

    /// Deletes a comment with its replies. Returns `Ok(false)` if not found.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

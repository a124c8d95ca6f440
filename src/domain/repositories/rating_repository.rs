//! Repository trait for image ratings.

use crate::domain::entities::{ImageRating, Rating};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for ratings. Lists are ordered newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Stores a rating.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already rated the image.
    async fn create(&self, image_id: i64, user_id: i64, rate: i16) -> Result<Rating, AppError>;

    async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError>;

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError>;

    /// Average and count of an image's ratings.
    async fn summary(&self, image_id: i64) -> Result<ImageRating, AppError>;

    /// Images by average rating, best first. Unrated images come last.
    async fn top_images(&self, offset: i64, limit: i64) -> Result<Vec<ImageRating>, AppError>;

    /// Returns `Ok(false)` if not found.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

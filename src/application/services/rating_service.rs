//! Image ratings.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::services::user_service::require_moderator;
use crate::domain::entities::{ImageRating, MAX_RATE, MIN_RATE, Rating, User};
use crate::domain::repositories::{ImageRepository, RatingRepository};
use crate::error::AppError;

pub struct RatingService {
    ratings: Arc<dyn RatingRepository>,
    images: Arc<dyn ImageRepository>,
}

impl RatingService {
    pub fn new(ratings: Arc<dyn RatingRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { ratings, images }
    }

    /// Rates someone else's image once.
    ///
    /// # Errors
    ///
    /// * [`AppError::Validation`] if `rate` is outside 1..=5.
    /// * [`AppError::NotFound`] if the image does not exist.
    /// * [`AppError::Forbidden`] if the image belongs to `user`.
    /// * [`AppError::Conflict`] if `user` already rated it.
    pub async fn rate(&self, user: &User, image_id: i64, rate: i16) -> Result<Rating, AppError> {
        if !(MIN_RATE..=MAX_RATE).contains(&rate) {
            return Err(AppError::bad_request(
                format!("Rate must be between {MIN_RATE} and {MAX_RATE}"),
                json!({ "rate": rate }),
            ));
        }

        let image = self
            .images
            .find(image_id)
            .await?
            .ok_or_else(|| image_not_found(image_id))?;
        if image.user_id == user.id {
            return Err(AppError::forbidden(
                "You cannot rate your own image",
                json!({ "image_id": image_id }),
            ));
        }

        let rating = self
            .ratings
            .create(image_id, user.id, rate)
            .await
            .map_err(|e| match e {
                AppError::Conflict { details, .. } => {
                    AppError::conflict("You have already rated this image", details)
                }
                other => other,
            })?;
        info!(user_id = user.id, image_id, rate, "Image rated");
        Ok(rating)
    }

    pub async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError> {
        self.ensure_image(image_id).await?;
        self.ratings.list_for_image(image_id, offset, limit).await
    }

    pub async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError> {
        self.ratings.list_by_user(user_id, offset, limit).await
    }

    /// Average and count of an image's ratings.
    pub async fn summary(&self, image_id: i64) -> Result<ImageRating, AppError> {
        self.ensure_image(image_id).await?;
        self.ratings.summary(image_id).await
    }

    /// Images by descending average rating; unrated images come last.
    pub async fn top_images(&self, offset: i64, limit: i64) -> Result<Vec<ImageRating>, AppError> {
        self.ratings.top_images(offset, limit).await
    }

    /// Removes a rating. Moderators and administrators only.
    pub async fn delete(&self, actor: &User, id: i64) -> Result<(), AppError> {
        require_moderator(actor)?;

        if !self.ratings.delete(id).await? {
            return Err(AppError::not_found("Rating not found", json!({ "id": id })));
        }
        info!(user_id = actor.id, rating_id = id, "Rating deleted");
        Ok(())
    }

    async fn ensure_image(&self, image_id: i64) -> Result<(), AppError> {
        match self.images.find(image_id).await? {
            Some(_) => Ok(()),
            None => Err(image_not_found(image_id)),
        }
    }
}

fn image_not_found(id: i64) -> AppError {
    AppError::not_found("Image not found", json!({ "id": id }))
}

//! DTOs for comments and ratings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Comment, ImageRating, Rating};

/// Request body for creating or editing a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 2, max = 2048, message = "Comment must be 2 to 2048 characters"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub image_id: i64,
    pub user_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            image_id: c.image_id,
            user_id: c.user_id,
            parent_id: c.parent_id,
            text: c.text,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Request body for `POST /api/images/{id}/rates`.
#[derive(Debug, Deserialize, Validate)]
pub struct RatingRequest {
    #[validate(range(min = 1, max = 5, message = "Rate must be between 1 and 5"))]
    pub rate: i16,
}

#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub id: i64,
    pub image_id: i64,
    pub user_id: i64,
    pub rate: i16,
    pub created_at: DateTime<Utc>,
}

impl From<Rating> for RatingResponse {
    fn from(r: Rating) -> Self {
        Self {
            id: r.id,
            image_id: r.image_id,
            user_id: r.user_id,
            rate: r.rate,
            created_at: r.created_at,
        }
    }
}

/// Average rating of an image. `avg_rate` is null until someone rates it.
#[derive(Debug, Serialize)]
pub struct ImageRatingResponse {
    pub image_id: i64,
    pub avg_rate: Option<f64>,
    pub rates: i64,
}

impl From<ImageRating> for ImageRatingResponse {
    fn from(r: ImageRating) -> Self {
        Self {
            image_id: r.image_id,
            avg_rate: r.average,
            rates: r.count,
        }
    }
}

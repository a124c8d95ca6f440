//! Rating entities.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MIN_RATE: i16 = 1;
pub const MAX_RATE: i16 = 5;

/// One user's 1..=5 rating of an image. A user rates an image at most once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub id: i64,
    pub image_id: i64,
    pub user_id: i64,
    pub rate: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregated ratings of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRating {
    pub image_id: i64,
    /// `None` when the image has no ratings yet.
    pub average: Option<f64>,
    pub count: i64,
}

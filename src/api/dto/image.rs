//! DTOs for the `/api/images` and `/api/tags` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::domain::entities::{Image, NewImage, Tag};

/// Request body for `POST /api/images`.
///
/// The image itself is hosted elsewhere; only its URL is stored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateImageRequest {
    #[validate(url(message = "Invalid image URL"), length(max = 2048))]
    pub url: String,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl CreateImageRequest {
    /// Splits the request into the image data and its raw tag titles.
    pub fn into_parts(self) -> (NewImage, Vec<String>) {
        (
            NewImage {
                url: self.url.trim().to_string(),
                description: self.description,
            },
            self.tags,
        )
    }
}

/// Request body for `PATCH /api/images/{id}`. A null description clears it.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateImageRequest {
    #[validate(length(max = 1024))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: i64,
    pub user_id: i64,
    pub url: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Image> for ImageResponse {
    fn from(i: Image) -> Self {
        Self {
            id: i.id,
            user_id: i.user_id,
            url: i.url,
            description: i.description,
            tags: i.tags,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

/// Query parameters for `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub struct TagListQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Substring of the title.
    pub tag_title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Tag> for TagResponse {
    fn from(t: Tag) -> Self {
        Self {
            id: t.id,
            title: t.title,
            user_id: t.user_id,
            created_at: t.created_at,
        }
    }
}

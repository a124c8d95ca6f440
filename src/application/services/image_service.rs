//! Image records and the tags attached to them.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::domain::entities::{Image, MAX_TAGS_PER_IMAGE, NewImage, User, normalize_tag_title};
use crate::domain::repositories::{ImageRepository, TagRepository};
use crate::error::AppError;

/// Service behind the `/api/images` routes.
///
/// Any authenticated user can read any image. Only the owner can change or
/// delete it; for everyone else it behaves as missing.
pub struct ImageService {
    images: Arc<dyn ImageRepository>,
    tags: Arc<dyn TagRepository>,
}

fn image_not_found(id: i64) -> AppError {
    AppError::not_found("Image not found", json!({ "id": id }))
}

/// Normalizes a tag title or rejects it with `400`.
pub fn tag_title(raw: &str) -> Result<String, AppError> {
    normalize_tag_title(raw).ok_or_else(|| {
        AppError::bad_request(
            "Tag titles are 2 to 49 letters, digits, '_', '.' or '-'",
            json!({ "tag": raw }),
        )
    })
}

fn too_many_tags() -> AppError {
    AppError::bad_request(
        format!("An image can carry at most {MAX_TAGS_PER_IMAGE} tags"),
        json!({ "max_tags": MAX_TAGS_PER_IMAGE }),
    )
}

impl ImageService {
    pub fn new(images: Arc<dyn ImageRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { images, tags }
    }

    /// Publishes an image with up to [`MAX_TAGS_PER_IMAGE`] distinct tags.
    ///
    /// Unknown tags are created on the fly.
    pub async fn create(
        &self,
        owner: &User,
        image: NewImage,
        tags: &[String],
    ) -> Result<Image, AppError> {
        let mut titles = Vec::with_capacity(tags.len());
        for raw in tags {
            let title = tag_title(raw)?;
            if !titles.contains(&title) {
                titles.push(title);
            }
        }
        if titles.len() > MAX_TAGS_PER_IMAGE {
            return Err(too_many_tags());
        }

        let image = self.images.create(owner.id, image).await?;
        info!(user_id = owner.id, image_id = image.id, "Image created");

        if titles.is_empty() {
            return Ok(image);
        }
        for title in &titles {
            let tag = self.tags.find_or_create(title, owner.id).await?;
            self.images.attach_tag(image.id, tag.id).await?;
        }
        self.get(image.id).await
    }

    pub async fn get(&self, id: i64) -> Result<Image, AppError> {
        self.images
            .find(id)
            .await?
            .ok_or_else(|| image_not_found(id))
    }

    pub async fn list_by_user(
        &self,
        owner_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Image>, AppError> {
        self.images.list_by_user(owner_id, offset, limit).await
    }

    pub async fn update_description(
        &self,
        owner_id: i64,
        id: i64,
        description: Option<String>,
    ) -> Result<Image, AppError> {
        self.images
            .update_description(owner_id, id, description)
            .await?
            .ok_or_else(|| image_not_found(id))
    }

    pub async fn delete(&self, owner_id: i64, id: i64) -> Result<(), AppError> {
        if !self.images.delete(owner_id, id).await? {
            return Err(image_not_found(id));
        }
        info!(user_id = owner_id, image_id = id, "Image deleted");
        Ok(())
    }

    /// Attaches a tag to the owner's image. Attaching a present tag is a no-op.
    pub async fn add_tag(&self, owner: &User, image_id: i64, raw: &str) -> Result<Image, AppError> {
        let title = tag_title(raw)?;
        let image = self.owned(owner.id, image_id).await?;

        if image.has_tag(&title) {
            return Ok(image);
        }
        if !image.accepts_tag(&title) {
            return Err(too_many_tags());
        }

        let tag = self.tags.find_or_create(&title, owner.id).await?;
        self.images.attach_tag(image_id, tag.id).await?;
        self.get(image_id).await
    }

    /// Detaches a tag from the owner's image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the tag does not exist at all.
    pub async fn remove_tag(
        &self,
        owner_id: i64,
        image_id: i64,
        raw: &str,
    ) -> Result<Image, AppError> {
        let title = tag_title(raw)?;
        self.owned(owner_id, image_id).await?;

        let tag = self
            .tags
            .find_by_title(&title)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "tag": title })))?;

        self.images.detach_tag(image_id, tag.id).await?;
        self.get(image_id).await
    }

    async fn owned(&self, owner_id: i64, image_id: i64) -> Result<Image, AppError> {
        self.images
            .find(image_id)
            .await?
            .filter(|image| image.user_id == owner_id)
            .ok_or_else(|| image_not_found(image_id))
    }
}

//! PostgreSQL implementation of the image repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Image, NewImage};
use crate::domain::repositories::ImageRepository;
use crate::error::AppError;

/// Image columns plus the sorted tag titles, for a query aliasing `images` as `i`.
const IMAGE_COLUMNS: &str = "i.id, i.user_id, i.url, i.description, i.created_at, i.updated_at, \
     ARRAY(SELECT t.title::TEXT FROM image_tags it JOIN tags t ON t.id = it.tag_id \
           WHERE it.image_id = i.id ORDER BY t.title) AS tags";

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i64,
    user_id: i64,
    url: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tags: Vec<String>,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Image {
            id: row.id,
            user_id: row.user_id,
            url: row.url,
            description: row.description,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgImageRepository {
    pool: Arc<PgPool>,
}

impl PgImageRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    async fn create(&self, user_id: i64, image: NewImage) -> Result<Image, AppError> {
        let sql = format!(
            r#"
            INSERT INTO images AS i (user_id, url, description)
            VALUES ($1, $2, $3)
            RETURNING {IMAGE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ImageRow>(&sql)
            .bind(user_id)
            .bind(&image.url)
            .bind(&image.description)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find(&self, id: i64) -> Result<Option<Image>, AppError> {
        let sql = format!("SELECT {IMAGE_COLUMNS} FROM images i WHERE i.id = $1");
        let row = sqlx::query_as::<_, ImageRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Image::from))
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Image>, AppError> {
        let sql = format!(
            "SELECT {IMAGE_COLUMNS} FROM images i WHERE i.user_id = $1 \
             ORDER BY i.created_at DESC, i.id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, ImageRow>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Image::from).collect())
    }

    async fn update_description(
        &self,
        user_id: i64,
        id: i64,
        description: Option<String>,
    ) -> Result<Option<Image>, AppError> {
        let sql = format!(
            r#"
            UPDATE images AS i
            SET description = $3, updated_at = NOW()
            WHERE i.id = $1 AND i.user_id = $2
            RETURNING {IMAGE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ImageRow>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(&description)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Image::from))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn attach_tag(&self, image_id: i64, tag_id: i64) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO image_tags (image_id, tag_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(image_id)
        .bind(tag_id)
        .execute(self.pool.as_ref())
        .await?;

        sqlx::query("UPDATE images SET updated_at = NOW() WHERE id = $1")
            .bind(image_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn detach_tag(&self, image_id: i64, tag_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM image_tags WHERE image_id = $1 AND tag_id = $2")
            .bind(image_id)
            .bind(tag_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }
}

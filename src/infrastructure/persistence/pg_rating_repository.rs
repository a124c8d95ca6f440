//! PostgreSQL implementation of the rating repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ImageRating, Rating};
use crate::domain::repositories::RatingRepository;
use crate::error::AppError;

const RATING_COLUMNS: &str = "id, image_id, user_id, rate, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct RatingRow {
    id: i64,
    image_id: i64,
    user_id: i64,
    rate: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating {
            id: row.id,
            image_id: row.image_id,
            user_id: row.user_id,
            rate: row.rate,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    image_id: i64,
    average: Option<f64>,
    count: i64,
}

impl From<SummaryRow> for ImageRating {
    fn from(row: SummaryRow) -> Self {
        ImageRating {
            image_id: row.image_id,
            average: row.average,
            count: row.count,
        }
    }
}

pub struct PgRatingRepository {
    pool: Arc<PgPool>,
}

impl PgRatingRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepository {
    async fn create(&self, image_id: i64, user_id: i64, rate: i16) -> Result<Rating, AppError> {
        let sql = format!(
            r#"
            INSERT INTO ratings (image_id, user_id, rate)
            VALUES ($1, $2, $3)
            RETURNING {RATING_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(image_id)
            .bind(user_id)
            .bind(rate)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError> {
        let sql = format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE image_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(image_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Rating>, AppError> {
        let sql = format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, RatingRow>(&sql)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn summary(&self, image_id: i64) -> Result<ImageRating, AppError> {
        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT $1::BIGINT AS image_id, AVG(rate)::FLOAT8 AS average, COUNT(*) AS count
            FROM ratings
            WHERE image_id = $1
            "#,
        )
        .bind(image_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn top_images(&self, offset: i64, limit: i64) -> Result<Vec<ImageRating>, AppError> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT i.id AS image_id, AVG(r.rate)::FLOAT8 AS average, COUNT(r.id) AS count
            FROM images i
            LEFT JOIN ratings r ON r.image_id = i.id
            GROUP BY i.id
            ORDER BY average DESC NULLS LAST, i.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ImageRating::from).collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

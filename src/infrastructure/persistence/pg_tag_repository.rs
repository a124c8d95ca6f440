//! PostgreSQL implementation of the tag repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::Tag;
use crate::domain::repositories::TagRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::pg_contact_repository::like_pattern;

const TAG_COLUMNS: &str = "id, title, user_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    title: String,
    user_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            id: row.id,
            title: row.title,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgTagRepository {
    pool: Arc<PgPool>,
}

impl PgTagRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn list(
        &self,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Tag>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {TAG_COLUMNS} FROM tags"));

        if let Some(search) = search {
            qb.push(" WHERE title ILIKE ").push_bind(like_pattern(&search));
        }

        qb.push(" ORDER BY title LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<TagRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, AppError> {
        let sql = format!("SELECT {TAG_COLUMNS} FROM tags WHERE title = $1");
        let row = sqlx::query_as::<_, TagRow>(&sql)
            .bind(title)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Tag::from))
    }

    async fn find_or_create(&self, title: &str, user_id: i64) -> Result<Tag, AppError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let sql = format!(
            r#"
            INSERT INTO tags (title, user_id)
            VALUES ($1, $2)
            ON CONFLICT (title) DO UPDATE SET title = EXCLUDED.title
            RETURNING {TAG_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, TagRow>(&sql)
            .bind(title)
            .bind(user_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn delete(&self, title: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tags WHERE title = $1")
            .bind(title)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

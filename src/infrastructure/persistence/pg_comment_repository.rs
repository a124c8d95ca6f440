//! PostgreSQL implementation of the comment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Comment, NewComment};
use crate::domain::repositories::CommentRepository;
use crate::error::AppError;

const COMMENT_COLUMNS: &str = "id, image_id, user_id, parent_id, text, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    image_id: i64,
    user_id: i64,
    parent_id: Option<i64>,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            image_id: row.image_id,
            user_id: row.user_id,
            parent_id: row.parent_id,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct PgCommentRepository {
    pool: Arc<PgPool>,
}

impl PgCommentRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn list_where(
        &self,
        condition: &str,
        value: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE {condition} \
             ORDER BY created_at, id LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(value)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, AppError> {
        let sql = format!(
            r#"
            INSERT INTO comments (image_id, user_id, parent_id, text)
            VALUES ($1, $2, $3, $4)
            RETURNING {COMMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(comment.image_id)
            .bind(comment.user_id)
            .bind(comment.parent_id)
            .bind(&comment.text)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Comment::from))
    }

    async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        self.list_where("image_id = $1 AND parent_id IS NULL", image_id, offset, limit)
            .await
    }

    async fn list_replies(
        &self,
        parent_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        self.list_where("parent_id = $1", parent_id, offset, limit)
            .await
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        self.list_where("user_id = $1", user_id, offset, limit)
            .await
    }

    async fn update_text(
        &self,
        user_id: i64,
        id: i64,
        text: &str,
    ) -> Result<Option<Comment>, AppError> {
        let sql = format!(
            r#"
            UPDATE comments
            SET text = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {COMMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CommentRow>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(text)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Comment::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUser, Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

const USER_COLUMNS: &str = "id, username, email, password_hash, avatar, role, refresh_token, \
     is_email_confirmed, is_password_valid, is_active, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    avatar: Option<String>,
    role: String,
    refresh_token: Option<String>,
    is_email_confirmed: bool,
    is_password_valid: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|e| {
            AppError::internal("Corrupted user role", json!({ "id": row.id, "reason": e }))
        })?;

        Ok(User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            avatar: row.avatar,
            role,
            refresh_token: row.refresh_token,
            is_email_confirmed: row.is_email_confirmed,
            is_password_valid: row.is_password_valid,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn user_not_found(id: i64) -> AppError {
    AppError::not_found("User not found", json!({ "id": id }))
}

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn execute_flag_update(&self, sql: &str, id: i64) -> Result<(), AppError> {
        let result = sqlx::query(sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            r#"
            INSERT INTO users (username, email, password_hash, avatar, role, is_email_confirmed)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.avatar)
            .bind(new_user.role.as_str())
            .bind(new_user.is_email_confirmed)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.fetch_one_by("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.fetch_one_by("username", username).await
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }

    async fn update_refresh_token(&self, id: i64, token: Option<String>) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    async fn confirm_email(&self, id: i64) -> Result<(), AppError> {
        self.execute_flag_update(
            "UPDATE users SET is_email_confirmed = TRUE, updated_at = NOW() WHERE id = $1",
            id,
        )
        .await
    }

    async fn set_password_valid(&self, id: i64, valid: bool) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE users SET is_password_valid = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(valid)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2,
                is_password_valid = TRUE,
                refresh_token = NULL,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }
        Ok(())
    }

    async fn update_profile(
        &self,
        id: i64,
        username: &str,
        avatar: Option<String>,
    ) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET username = $2,
                avatar = COALESCE($3, avatar),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(username)
            .bind(avatar)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| user_not_found(id))?
            .try_into()
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<User, AppError> {
        let sql = format!(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| user_not_found(id))?
            .try_into()
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<User, AppError> {
        let sql = format!(
            r#"
            UPDATE users
            SET is_active = $2,
                refresh_token = CASE WHEN $2 THEN refresh_token ELSE NULL END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .bind(active)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| user_not_found(id))?
            .try_into()
    }
}

//! PostgreSQL implementation of the contact repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Contact, ContactData, ContactFilter};
use crate::domain::repositories::ContactRepository;
use crate::error::AppError;

const CONTACT_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone, birthday, \
     address, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    user_id: i64,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    birthday: chrono::NaiveDate,
    address: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: row.id,
            user_id: row.user_id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            birthday: row.birthday,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Escapes `%`, `_` and `\` so user input matches literally inside `ILIKE`.
pub(crate) fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// PostgreSQL repository for contacts. Every query is scoped by owner.
pub struct PgContactRepository {
    pool: Arc<PgPool>,
}

impl PgContactRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactRepository for PgContactRepository {
    async fn list(
        &self,
        user_id: i64,
        filter: ContactFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Contact>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts WHERE user_id = "
        ));
        qb.push_bind(user_id);

        for (column, value) in [
            ("first_name", &filter.first_name),
            ("last_name", &filter.last_name),
            ("email", &filter.email),
        ] {
            if let Some(value) = value {
                qb.push(format!(" AND {column} ILIKE "))
                    .push_bind(like_pattern(value));
            }
        }

        qb.push(" ORDER BY id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = qb
            .build_query_as::<ContactRow>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn list_all(&self, user_id: i64) -> Result<Vec<Contact>, AppError> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE user_id = $1 ORDER BY id");
        let rows = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(user_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Contact>, AppError> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 AND user_id = $2");
        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Contact::from))
    }

    async fn create(&self, user_id: i64, data: ContactData) -> Result<Contact, AppError> {
        let sql = format!(
            r#"
            INSERT INTO contacts (user_id, first_name, last_name, email, phone, birthday, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(user_id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(data.birthday)
            .bind(&data.address)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        data: ContactData,
    ) -> Result<Option<Contact>, AppError> {
        let sql = format!(
            r#"
            UPDATE contacts
            SET first_name = $3,
                last_name = $4,
                email = $5,
                phone = $6,
                birthday = $7,
                address = $8,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ContactRow>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(data.birthday)
            .bind(&data.address)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Contact::from))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}

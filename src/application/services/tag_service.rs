//! Tag catalogue.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::services::image_service::tag_title;
use crate::application::services::user_service::require_admin;
use crate::domain::entities::{Tag, User};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

/// Service behind the `/api/tags` routes.
pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// Tags ordered by title, optionally those containing `search`.
    pub async fn list(
        &self,
        search: Option<String>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Tag>, AppError> {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        self.tags.list(search, offset, limit).await
    }

    /// Returns the tag with this title, creating it for `user` if missing.
    pub async fn get_or_create(&self, user: &User, raw: &str) -> Result<Tag, AppError> {
        let title = tag_title(raw)?;
        if let Some(tag) = self.tags.find_by_title(&title).await? {
            return Ok(tag);
        }
        let tag = self.tags.find_or_create(&title, user.id).await?;
        info!(user_id = user.id, tag = %tag.title, "Tag created");
        Ok(tag)
    }

    /// Deletes a tag everywhere. Administrators only.
    pub async fn delete(&self, actor: &User, raw: &str) -> Result<(), AppError> {
        require_admin(actor)?;
        let title = tag_title(raw)?;

        if !self.tags.delete(&title).await? {
            return Err(AppError::not_found("Tag not found", json!({ "tag": title })));
        }
        info!(user_id = actor.id, tag = %title, "Tag deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use crate::domain::repositories::MockTagRepository;
    use chrono::Utc;

    fn user(role: Role) -> User {
        User {
            id: 3,
            username: "carol".to_string(),
            email: "carol@example.com".to_string(),
            password_hash: "hash".to_string(),
            avatar: None,
            role,
            refresh_token: None,
            is_email_confirmed: true,
            is_password_valid: true,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_get_or_create_creates_missing_tag() {
        let mut repo = MockTagRepository::new();
        repo.expect_find_by_title().returning(|_| Ok(None));
        repo.expect_find_or_create()
            .withf(|title, user_id| title == "sunset" && *user_id == 3)
            .times(1)
            .returning(|title, user_id| {
                Ok(Tag {
                    id: 1,
                    title: title.to_string(),
                    user_id,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let tag = TagService::new(Arc::new(repo))
            .get_or_create(&user(Role::User), "SunSet")
            .await
            .unwrap();

        assert_eq!(tag.title, "sunset");
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let mut repo = MockTagRepository::new();
        repo.expect_delete().never();
        let service = TagService::new(Arc::new(repo));

        for role in [Role::User, Role::Moderator] {
            let result = service.delete(&user(role), "sunset").await;
            assert!(matches!(result, Err(AppError::Forbidden { .. })));
        }
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repo = MockTagRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let result = TagService::new(Arc::new(repo))
            .delete(&user(Role::Administrator), "ghost")
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_ignores_blank_search() {
        let mut repo = MockTagRepository::new();
        repo.expect_list()
            .withf(|search, offset, limit| search.is_none() && *offset == 0 && *limit == 10)
            .returning(|_, _, _| Ok(vec![]));

        TagService::new(Arc::new(repo))
            .list(Some("  ".to_string()), 0, 10)
            .await
            .unwrap();
    }
}

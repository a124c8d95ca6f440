//! Comments on images and one level of replies.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::services::user_service::require_moderator;
use crate::domain::entities::{Comment, NewComment, User};
use crate::domain::repositories::{CommentRepository, ImageRepository};
use crate::error::AppError;

pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    images: Arc<dyn ImageRepository>,
}

fn comment_not_found(id: i64) -> AppError {
    AppError::not_found("Comment not found", json!({ "id": id }))
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, images: Arc<dyn ImageRepository>) -> Self {
        Self { comments, images }
    }

    /// Top-level comments of an image, oldest first.
    pub async fn list_for_image(
        &self,
        image_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        self.ensure_image(image_id).await?;
        self.comments.list_for_image(image_id, offset, limit).await
    }

    pub async fn comment_on_image(
        &self,
        author: &User,
        image_id: i64,
        text: String,
    ) -> Result<Comment, AppError> {
        self.ensure_image(image_id).await?;

        let comment = self
            .comments
            .create(NewComment {
                image_id,
                user_id: author.id,
                parent_id: None,
                text,
            })
            .await?;
        info!(user_id = author.id, comment_id = comment.id, image_id, "Comment created");
        Ok(comment)
    }

    /// Replies to a top-level comment. Replies cannot themselves be answered.
    pub async fn reply(
        &self,
        author: &User,
        parent_id: i64,
        text: String,
    ) -> Result<Comment, AppError> {
        let parent = self.get(parent_id).await?;
        if parent.is_reply() {
            return Err(AppError::bad_request(
                "Replies cannot be answered",
                json!({ "parent_id": parent_id }),
            ));
        }

        let comment = self
            .comments
            .create(NewComment {
                image_id: parent.image_id,
                user_id: author.id,
                parent_id: Some(parent_id),
                text,
            })
            .await?;
        info!(user_id = author.id, comment_id = comment.id, parent_id, "Reply created");
        Ok(comment)
    }

    pub async fn list_replies(
        &self,
        parent_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        self.get(parent_id).await?;
        self.comments.list_replies(parent_id, offset, limit).await
    }

    pub async fn list_by_user(
        &self,
        user_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Comment>, AppError> {
        self.comments.list_by_user(user_id, offset, limit).await
    }

    /// Edits the author's own comment. Other users' comments are reported
    /// missing.
    pub async fn update(&self, author: &User, id: i64, text: &str) -> Result<Comment, AppError> {
        self.comments
            .update_text(author.id, id, text)
            .await?
            .ok_or_else(|| comment_not_found(id))
    }

    /// Removes a comment and its replies. Moderators and administrators only.
    pub async fn delete(&self, actor: &User, id: i64) -> Result<(), AppError> {
        require_moderator(actor)?;

        if !self.comments.delete(id).await? {
            return Err(comment_not_found(id));
        }
        info!(user_id = actor.id, comment_id = id, "Comment deleted");
        Ok(())
    }

    async fn get(&self, id: i64) -> Result<Comment, AppError> {
        self.comments
            .find(id)
            .await?
            .ok_or_else(|| comment_not_found(id))
    }

    async fn ensure_image(&self, image_id: i64) -> Result<(), AppError> {
        match self.images.find(image_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(
                "Image not found",
                json!({ "id": image_id }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Image, Role};
    use crate::domain::repositories::{MockCommentRepository, MockImageRepository};
    use chrono::Utc;

    fn user(role: Role) -> User {
        User {
            id: 4,
            username: "dave".to_string(),
            email: "dave@example.com".to_string(),
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

    fn comment(id: i64, parent_id: Option<i64>) -> Comment {
        Comment {
            id,
            image_id: 9,
            user_id: 1,
            parent_id,
            text: "Lovely light".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn no_image() -> MockImageRepository {
        let mut images = MockImageRepository::new();
        images.expect_find().returning(|_| Ok(None));
        images
    }

    #[tokio::test]
    async fn test_comment_on_missing_image_is_not_found() {
        let mut comments = MockCommentRepository::new();
        comments.expect_create().never();

        let result = CommentService::new(Arc::new(comments), Arc::new(no_image()))
            .comment_on_image(&user(Role::User), 9, "Hello".to_string())
            .await;

        match result {
            Err(AppError::NotFound { message, .. }) => assert_eq!(message, "Image not found"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_comment_on_image() {
        let mut images = MockImageRepository::new();
        images.expect_find().returning(|id| {
            Ok(Some(Image {
                id,
                user_id: 1,
                url: "https://img.example.com/9.png".to_string(),
                description: None,
                tags: vec![],
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }))
        });
        let mut comments = MockCommentRepository::new();
        comments
            .expect_create()
            .withf(|c| c.image_id == 9 && c.user_id == 4 && c.parent_id.is_none())
            .returning(|c| {
                let mut created = comment(1, None);
                created.user_id = c.user_id;
                created.text = c.text;
                Ok(created)
            });

        let created = CommentService::new(Arc::new(comments), Arc::new(images))
            .comment_on_image(&user(Role::User), 9, "Hello".to_string())
            .await
            .unwrap();

        assert_eq!(created.user_id, 4);
        assert_eq!(created.text, "Hello");
    }

    #[tokio::test]
    async fn test_reply_inherits_image_of_parent() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_find()
            .returning(|id| Ok(Some(comment(id, None))));
        comments
            .expect_create()
            .withf(|c| c.image_id == 9 && c.parent_id == Some(1))
            .returning(|c| Ok(comment(2, c.parent_id)));

        let reply = CommentService::new(Arc::new(comments), Arc::new(MockImageRepository::new()))
            .reply(&user(Role::User), 1, "Agreed".to_string())
            .await
            .unwrap();

        assert!(reply.is_reply());
    }

    #[tokio::test]
    async fn test_reply_to_reply_is_rejected() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_find()
            .returning(|id| Ok(Some(comment(id, Some(1)))));
        comments.expect_create().never();

        let result = CommentService::new(Arc::new(comments), Arc::new(MockImageRepository::new()))
            .reply(&user(Role::User), 2, "Nested".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_foreign_comment_is_not_found() {
        let mut comments = MockCommentRepository::new();
        comments
            .expect_update_text()
            .withf(|user_id, id, _| *user_id == 4 && *id == 1)
            .returning(|_, _, _| Ok(None));

        let result = CommentService::new(Arc::new(comments), Arc::new(MockImageRepository::new()))
            .update(&user(Role::User), 1, "Edited")
            .await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_requires_moderator() {
        let mut comments = MockCommentRepository::new();
        comments.expect_delete().times(2).returning(|_| Ok(true));
        let service =
            CommentService::new(Arc::new(comments), Arc::new(MockImageRepository::new()));

        let result = service.delete(&user(Role::User), 1).await;
        assert!(matches!(result, Err(AppError::Forbidden { .. })));

        service.delete(&user(Role::Moderator), 1).await.unwrap();
        service.delete(&user(Role::Administrator), 1).await.unwrap();
    }
}

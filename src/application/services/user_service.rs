//! User profile and account administration.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::services::user_cache::UserCache;
use crate::domain::entities::{Role, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Service behind the `/api/users` routes.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    cache: UserCache,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, cache: UserCache) -> Self {
        Self { users, cache }
    }

    /// Looks up a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no such user exists.
    pub async fn get_by_username(&self, username: &str) -> Result<User, AppError> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "username": username })))
    }

    /// Replaces the caller's username and, when given, avatar.
    pub async fn update_profile(
        &self,
        current: &User,
        username: &str,
        avatar: Option<String>,
    ) -> Result<User, AppError> {
        let username = username.trim();

        if username != current.username
            && let Some(other) = self.users.find_by_username(username).await?
            && other.id != current.id
        {
            return Err(AppError::conflict(
                "The username is already taken",
                json!({ "username": username }),
            ));
        }

        let user = self
            .users
            .update_profile(current.id, username, avatar)
            .await?;
        self.cache.put(&user).await;
        Ok(user)
    }

    /// Changes a user's role.
    pub async fn set_role(&self, username: &str, role: Role) -> Result<User, AppError> {
        let target = self.get_by_username(username).await?;
        let user = self.users.set_role(target.id, role).await?;
        self.cache.evict(&user.email).await;
        info!(user_id = user.id, role = %role, "Role changed");
        Ok(user)
    }

    /// Activates or deactivates an account.
    ///
    /// Administrators cannot deactivate themselves.
    pub async fn set_active(
        &self,
        actor: &User,
        username: &str,
        active: bool,
    ) -> Result<User, AppError> {
        if !active && actor.username == username {
            return Err(AppError::bad_request(
                "You cannot deactivate your own account",
                json!({ "username": username }),
            ));
        }

        self.change_activation(username, active).await
    }

    /// Activates or deactivates an account without an acting user.
    ///
    /// Used by the admin CLI. The cached record is evicted so the next
    /// authenticated request sees the new state.
    pub async fn change_activation(&self, username: &str, active: bool) -> Result<User, AppError> {
        let target = self.get_by_username(username).await?;
        let user = self.users.set_active(target.id, active).await?;
        self.cache.evict(&user.email).await;
        info!(user_id = user.id, active, "Account activation changed");
        Ok(user)
    }

    /// Total number of accounts.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.users.count().await
    }
}

/// Rejects callers that are not administrators.
pub fn require_admin(user: &User) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Operation not permitted",
            json!({ "required_role": Role::Administrator.as_str() }),
        ))
    }
}

/// Rejects callers that are neither moderators nor administrators.
pub fn require_moderator(user: &User) -> Result<(), AppError> {
    if user.can_moderate() {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Operation not permitted",
            json!({ "required_role": Role::Moderator.as_str() }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::infrastructure::cache::{CacheResult, CacheService, NullCache};
    use chrono::Utc;

    fn user(id: i64, username: &str, role: Role) -> User {
        User {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
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

    #[derive(Default)]
    struct RecordingCache {
        values: std::sync::Mutex<std::collections::HashMap<String, String>>,
    }

    #[async_trait::async_trait]
    impl CacheService for RecordingCache {
        async fn get(&self, key: &str) -> CacheResult<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        async fn set(&self, key: &str, value: &str, _ttl: Option<u64>) -> CacheResult<()> {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn invalidate(&self, key: &str) -> CacheResult<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn service(repo: MockUserRepository) -> UserService {
        UserService::new(
            Arc::new(repo),
            UserCache::new(Arc::new(NullCache::new()), 60),
        )
    }

    #[tokio::test]
    async fn test_get_by_username_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));

        let result = service(repo).get_by_username("ghost").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_taken_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(user(2, name, Role::User))));
        repo.expect_update_profile().never();

        let me = user(1, "alice", Role::User);
        let result = service(repo).update_profile(&me, "bob", None).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_profile_keeps_own_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().never();
        repo.expect_update_profile()
            .withf(|id, name, avatar| {
                *id == 1 && name == "alice" && avatar.as_deref() == Some("https://img/a.png")
            })
            .returning(|_, _, avatar| {
                let mut u = user(1, "alice", Role::User);
                u.avatar = avatar;
                Ok(u)
            });

        let me = user(1, "alice", Role::User);
        let updated = service(repo)
            .update_profile(&me, "alice", Some("https://img/a.png".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.avatar.as_deref(), Some("https://img/a.png"));
    }

    #[tokio::test]
    async fn test_admin_cannot_deactivate_self() {
        let mut repo = MockUserRepository::new();
        repo.expect_set_active().never();

        let admin = user(1, "root", Role::Administrator);
        let result = service(repo).set_active(&admin, "root", false).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_change_activation_evicts_cached_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(user(5, "bob", Role::User))));
        repo.expect_set_active()
            .withf(|id, active| *id == 5 && !*active)
            .times(1)
            .returning(|_, _| {
                let mut u = user(5, "bob", Role::User);
                u.is_active = false;
                Ok(u)
            });

        let cache = UserCache::new(Arc::new(RecordingCache::default()), 60);
        cache.put(&user(5, "bob", Role::User)).await;
        let service = UserService::new(Arc::new(repo), cache.clone());

        let updated = service.change_activation("bob", false).await.unwrap();

        assert!(!updated.is_active);
        assert!(cache.get("bob@example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_set_role_updates_target() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(user(5, "bob", Role::User))));
        repo.expect_set_role()
            .withf(|id, role| *id == 5 && *role == Role::Moderator)
            .times(1)
            .returning(|_, role| Ok(user(5, "bob", role)));

        let updated = service(repo).set_role("bob", Role::Moderator).await.unwrap();

        assert_eq!(updated.role, Role::Moderator);
    }

    #[test]
    fn test_require_moderator() {
        assert!(require_moderator(&user(1, "root", Role::Administrator)).is_ok());
        assert!(require_moderator(&user(2, "mod", Role::Moderator)).is_ok());
        assert!(matches!(
            require_moderator(&user(3, "bob", Role::User)),
            Err(AppError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&user(1, "root", Role::Administrator)).is_ok());
        assert!(matches!(
            require_admin(&user(2, "mod", Role::Moderator)),
            Err(AppError::Forbidden { .. })
        ));
    }
}

//! Cached user records and revoked access tokens.

use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::User;
use crate::infrastructure::cache::CacheService;

/// Extra time a revoked token stays blacklisted past its expiry.
pub const BLACKLIST_GRACE_SECONDS: u64 = 600;

/// Typed view over [`CacheService`] for user records (`user:{email}`) and the
/// access-token blacklist (`blacklist:{sha256(token)}`).
#[derive(Clone)]
pub struct UserCache {
    cache: Arc<dyn CacheService>,
    ttl_seconds: u64,
}

fn user_key(email: &str) -> String {
    format!("user:{}", email.to_lowercase())
}

fn blacklist_key(token: &str) -> String {
    format!("blacklist:{}", hex::encode(Sha256::digest(token.as_bytes())))
}

impl UserCache {
    pub fn new(cache: Arc<dyn CacheService>, ttl_seconds: u64) -> Self {
        Self { cache, ttl_seconds }
    }

    /// Whether revocations survive between requests.
    pub fn remembers_revocations(&self) -> bool {
        self.cache.is_persistent()
    }

    pub async fn get(&self, email: &str) -> Option<User> {
        let raw = self.cache.get(&user_key(email)).await.ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Discarding undecodable cached user");
                let _ = self.cache.invalidate(&user_key(email)).await;
                None
            }
        }
    }

    pub async fn put(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                if let Err(e) = self
                    .cache
                    .set(&user_key(&user.email), &raw, Some(self.ttl_seconds))
                    .await
                {
                    warn!(error = %e, "Failed to cache user");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize user for cache"),
        }
    }

    pub async fn evict(&self, email: &str) {
        if let Err(e) = self.cache.invalidate(&user_key(email)).await {
            warn!(error = %e, "Failed to evict cached user");
        }
    }

    /// Blacklists `token` for `remaining_seconds` plus [`BLACKLIST_GRACE_SECONDS`].
    pub async fn revoke_token(&self, token: &str, remaining_seconds: u64) {
        let ttl = remaining_seconds + BLACKLIST_GRACE_SECONDS;
        if let Err(e) = self.cache.set(&blacklist_key(token), "1", Some(ttl)).await {
            warn!(error = %e, "Failed to blacklist token");
        }
    }

    pub async fn is_revoked(&self, token: &str) -> bool {
        matches!(self.cache.get(&blacklist_key(token)).await, Ok(Some(_)))
    }
}

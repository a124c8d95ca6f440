//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{
    AuthService, CommentService, ContactService, ImageService, RatingService, TagService,
    UserService,
};
use crate::infrastructure::cache::CacheService;

/// Every service the handlers call, assembled once at startup.
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub contacts: ContactService,
    pub images: ImageService,
    pub tags: TagService,
    pub comments: CommentService,
    pub ratings: RatingService,
}

/// Cloned per request; everything heavy sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub contact_service: Arc<ContactService>,
    pub image_service: Arc<ImageService>,
    pub tag_service: Arc<TagService>,
    pub comment_service: Arc<CommentService>,
    pub rating_service: Arc<RatingService>,
    pub cache: Arc<dyn CacheService>,
    pub api_name: String,
}

impl AppState {
    pub fn new(
        services: Services,
        cache: Arc<dyn CacheService>,
        api_name: impl Into<String>,
    ) -> Self {
        Self {
            auth_service: Arc::new(services.auth),
            user_service: Arc::new(services.users),
            contact_service: Arc::new(services.contacts),
            image_service: Arc::new(services.images),
            tag_service: Arc::new(services.tags),
            comment_service: Arc::new(services.comments),
            rating_service: Arc::new(services.ratings),
            cache,
            api_name: api_name.into(),
        }
    }
}

//! Business logic services for the application layer.

pub mod auth_service;
pub mod comment_service;
pub mod contact_service;
pub mod email_service;
pub mod image_service;
pub mod rating_service;
pub mod tag_service;
pub mod user_cache;
pub mod user_service;

pub use auth_service::{AuthService, TokenPair};
pub use comment_service::CommentService;
pub use contact_service::ContactService;
pub use email_service::EmailService;
pub use image_service::ImageService;
pub use rating_service::RatingService;
pub use tag_service::TagService;
pub use user_cache::UserCache;
pub use user_service::{UserService, require_admin, require_moderator};

//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Accounts, credentials and verification flags
//! - [`ContactRepository`] - Per-user contact book
//! - [`ImageRepository`] - Image records and their tag links
//! - [`TagRepository`] - Tag catalogue
//! - [`CommentRepository`] - Comments and replies on images
//! - [`RatingRepository`] - Image ratings and their aggregates
//!
//! See integration tests in `tests/repository_*.rs` for usage against PostgreSQL.

pub mod comment_repository;
pub mod contact_repository;
pub mod image_repository;
pub mod rating_repository;
pub mod tag_repository;
pub mod user_repository;

pub use comment_repository::CommentRepository;
pub use contact_repository::ContactRepository;
pub use image_repository::ImageRepository;
pub use rating_repository::RatingRepository;
pub use tag_repository::TagRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
#[cfg(test)]
pub use image_repository::MockImageRepository;
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

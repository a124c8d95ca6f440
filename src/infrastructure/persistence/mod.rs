//! PostgreSQL repository implementations.
//!
//! Queries are built at runtime with `sqlx::query_as` and mapped through
//! `FromRow` row structs.
//!
//! - [`PgUserRepository`] - User accounts and credentials
//! - [`PgContactRepository`] - Per-user contact book
//! - [`PgImageRepository`] - Image records and tag links
//! - [`PgTagRepository`] - Tags
//! - [`PgCommentRepository`] - Comments and replies
//! - [`PgRatingRepository`] - Ratings and averages

pub mod pg_comment_repository;
pub mod pg_contact_repository;
pub mod pg_image_repository;
pub mod pg_rating_repository;
pub mod pg_tag_repository;
pub mod pg_user_repository;

pub use pg_comment_repository::PgCommentRepository;
pub use pg_contact_repository::PgContactRepository;
pub use pg_image_repository::PgImageRepository;
pub use pg_rating_repository::PgRatingRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_user_repository::PgUserRepository;

//! Core domain entities.
//!
//! - [`User`] - A registered account with role and verification flags
//! - [`Contact`] - An entry in a user's contact book
//! - [`Image`] - Metadata of a published image, with its [`Tag`]s
//! - [`Comment`] - A comment on an image, or a reply to one
//! - [`Rating`] - A user's 1..=5 rating of an image
//!
//! Creation and update inputs are separate structs (`NewUser`, `ContactData`,
//! `NewImage`, `NewComment`).

pub mod comment;
pub mod contact;
pub mod image;
pub mod rating;
pub mod tag;
pub mod user;

pub use comment::{Comment, NewComment};
pub use contact::{Contact, ContactData, ContactFilter};
pub use image::{Image, MAX_TAGS_PER_IMAGE, NewImage};
pub use rating::{ImageRating, MAX_RATE, MIN_RATE, Rating};
pub use tag::{Tag, normalize_tag_title};
pub use user::{NewUser, Role, User};

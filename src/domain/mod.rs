//! Domain layer containing business entities and rules.
//!
//! Independent of infrastructure and presentation concerns.
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`birthdays`] - Upcoming-birthday window selection

pub mod birthdays;
pub mod entities;
pub mod repositories;

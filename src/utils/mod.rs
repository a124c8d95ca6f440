//! Small helpers shared across layers.
//!
//! - [`gravatar`] - Default avatar URLs derived from an email address

pub mod gravatar;

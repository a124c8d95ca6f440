//! Tag entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const TAG_TITLE_MIN: usize = 2;
pub const TAG_TITLE_MAX: usize = 49;

/// A label that can be attached to images. Titles are unique and lowercase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub title: String,
    /// The user who first used the tag.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trims and lowercases a tag title.
///
/// Returns `None` unless the title is 2..=49 characters of ASCII letters,
/// digits, `_`, `.` or `-`.
pub fn normalize_tag_title(raw: &str) -> Option<String> {
    let title = raw.trim();
    let valid_chars = title
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if valid_chars && (TAG_TITLE_MIN..=TAG_TITLE_MAX).contains(&title.len()) {
        Some(title.to_ascii_lowercase())
    } else {
        None
    }
}

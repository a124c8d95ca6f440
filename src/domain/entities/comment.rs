//! Comment entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A comment on an image, or a reply to a top-level comment.
///
/// Replies are one level deep: a reply never has replies of its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: i64,
    pub image_id: i64,
    pub user_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Input data for creating a comment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub image_id: i64,
    pub user_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
}

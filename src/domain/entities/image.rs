//! Image record entity.
//!
//! Only metadata is stored. The picture itself lives at `url`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Most tags a single image can carry.
pub const MAX_TAGS_PER_IMAGE: usize = 5;

/// An image published by a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub id: i64,
    pub user_id: i64,
    pub url: String,
    pub description: Option<String>,
    /// Tag titles, sorted.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Image {
    pub fn has_tag(&self, title: &str) -> bool {
        self.tags.iter().any(|t| t == title)
    }

    /// Whether one more distinct tag may be attached.
    pub fn accepts_tag(&self, title: &str) -> bool {
        self.has_tag(title) || self.tags.len() < MAX_TAGS_PER_IMAGE
    }
}

/// Input data for publishing an image.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub url: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(tags: &[&str]) -> Image {
        Image {
            id: 1,
            user_id: 1,
            url: "https://img.example.com/1.png".to_string(),
            description: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_accepts_tag_up_to_limit() {
        assert!(image(&["a1", "b1", "c1", "d1"]).accepts_tag("e1"));

        let full = image(&["a1", "b1", "c1", "d1", "e1"]);
        assert!(!full.accepts_tag("f1"));
        assert!(full.accepts_tag("c1"));
    }
}

//! Blog entity - a post written by a user

use chrono::{DateTime, Utc};

use crate::value_objects::{BlogId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub id: BlogId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    pub fn new(id: BlogId, author_id: UserId, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            title,
            content,
            image_url: None,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_author(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Apply a partial update. Absent or empty fields keep their stored value.
    pub fn apply(&mut self, changes: BlogChanges) {
        fn keep_if_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        if let Some(title) = keep_if_empty(changes.title) {
            self.title = title;
        }
        if let Some(content) = keep_if_empty(changes.content) {
            self.content = content;
        }
        if let Some(image_url) = keep_if_empty(changes.image_url) {
            self.image_url = Some(image_url);
        }
        if let Some(category) = keep_if_empty(changes.category) {
            self.category = Some(category);
        }
        self.updated_at = Utc::now();
    }
}

/// Fields an author may change on an existing post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

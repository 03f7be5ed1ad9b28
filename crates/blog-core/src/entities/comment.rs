//! Comment entity - a message left on a blog post

use chrono::{DateTime, Utc};

use crate::value_objects::{BlogId, CommentId, UserId};

/// Comment row as stored. The like count is not a column; see [`CommentDetails`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub blog_id: BlogId,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub const MIN_MESSAGE_LEN: usize = 10;

    pub fn new(id: CommentId, author_id: UserId, blog_id: BlogId, message: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            blog_id,
            message,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_author(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    pub fn edit(&mut self, message: String) {
        self.message = message;
        self.updated_at = Utc::now();
    }
}

/// A comment joined with its author and its derived like count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDetails {
    pub comment: Comment,
    /// "first last" of the author, empty if the author row is gone
    pub author: String,
    pub avatar_url: Option<String>,
    /// Number of `user_comments` rows for this comment
    pub likes: i64,
}

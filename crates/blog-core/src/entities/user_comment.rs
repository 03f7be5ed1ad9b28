//! UserComment entity - a user's "like" on a comment

use chrono::{DateTime, Utc};

use crate::value_objects::{CommentId, UserId};

/// Join fact: `user_id` likes `comment_id`. At most one per pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserComment {
    pub user_id: UserId,
    pub comment_id: CommentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserComment {
    pub fn new(user_id: UserId, comment_id: CommentId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            comment_id,
            created_at: now,
            updated_at: now,
        }
    }
}

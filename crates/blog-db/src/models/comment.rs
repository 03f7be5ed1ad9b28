//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub comment_id: Uuid,
    pub author_id: Uuid,
    pub blog_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment joined with its author and like count (from query)
#[derive(Debug, Clone, FromRow)]
pub struct CommentDetailsModel {
    pub comment_id: Uuid,
    pub author_id: Uuid,
    pub blog_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: Option<String>,
    pub avatar_url: Option<String>,
    pub likes: i64,
}

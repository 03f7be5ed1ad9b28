//! Error handling utilities for repositories

use blog_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Foreign keys as named by PostgreSQL for the tables in `migrations/`
pub mod fk {
    pub const BLOGS_AUTHOR: &str = "blogs_author_id_fkey";
    pub const COMMENTS_AUTHOR: &str = "comments_author_id_fkey";
    pub const COMMENTS_BLOG: &str = "comments_blog_id_fkey";
    pub const USER_COMMENTS_USER: &str = "user_comments_user_id_fkey";
    pub const USER_COMMENTS_COMMENT: &str = "user_comments_comment_id_fkey";
}

/// Map a foreign key violation (referenced row missing) to a domain error.
///
/// `on_missing` gets the violated constraint's name and returns `None` for a
/// constraint it does not know, which leaves the error a database error.
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce(&str) -> Option<DomainError>,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            if let Some(mapped) = db_err.constraint().and_then(on_missing) {
                return mapped;
            }
        }
    }
    DomainError::DatabaseError(e.to_string())
}

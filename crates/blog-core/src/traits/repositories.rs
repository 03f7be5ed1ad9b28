//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Blog, Comment, CommentDetails, User, UserComment};
use crate::error::DomainError;
use crate::value_objects::{BlogId, CommentId, Page, PageRequest, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Record a successful login
    async fn touch_login(&self, id: UserId) -> RepoResult<()>;
}

// ============================================================================
// Blog Repository
// ============================================================================

#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn find_by_id(&self, id: BlogId) -> RepoResult<Option<Blog>>;

    /// Page through all posts, oldest first
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Blog>>;

    async fn create(&self, blog: &Blog) -> RepoResult<()>;

    async fn update(&self, blog: &Blog) -> RepoResult<()>;

    /// Returns `false` if no such post existed
    async fn delete(&self, id: BlogId) -> RepoResult<bool>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find a comment with author info and like count
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<CommentDetails>>;

    /// Page through the comments of a post, least recently updated first
    async fn list_by_blog(
        &self,
        blog_id: BlogId,
        page: PageRequest,
    ) -> RepoResult<Page<CommentDetails>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Update message content (edit)
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Returns `false` if no such comment existed
    async fn delete(&self, id: CommentId) -> RepoResult<bool>;
}

// ============================================================================
// UserComment Repository (reaction store)
// ============================================================================

/// Likes are `(user, comment)` rows. Writes are single atomic statements so
/// concurrent duplicates never surface as errors.
#[async_trait]
pub trait UserCommentRepository: Send + Sync {
    /// Point lookup
    async fn find(&self, user_id: UserId, comment_id: CommentId)
        -> RepoResult<Option<UserComment>>;

    async fn exists(&self, user_id: UserId, comment_id: CommentId) -> RepoResult<bool> {
        Ok(self.find(user_id, comment_id).await?.is_some())
    }

    /// Insert unless the pair is already present. Returns `true` if a row was written.
    async fn insert_if_absent(&self, like: &UserComment) -> RepoResult<bool>;

    /// Delete the pair if present. Returns `true` if a row was removed.
    async fn delete_if_present(&self, user_id: UserId, comment_id: CommentId)
        -> RepoResult<bool>;

    /// Number of likes on a comment
    async fn count_by_comment(&self, comment_id: CommentId) -> RepoResult<i64>;
}

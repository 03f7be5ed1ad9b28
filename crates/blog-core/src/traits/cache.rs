//! Read-through cache port for blog posts

use async_trait::async_trait;

use crate::entities::Blog;
use crate::value_objects::BlogId;

use super::RepoResult;

/// Post cache. Callers treat failures as misses; the database stays authoritative.
#[async_trait]
pub trait BlogCache: Send + Sync {
    async fn get(&self, id: BlogId) -> RepoResult<Option<Blog>>;

    /// Store with the configured TTL
    async fn set(&self, blog: &Blog) -> RepoResult<()>;

    async fn invalidate(&self, id: BlogId) -> RepoResult<()>;
}

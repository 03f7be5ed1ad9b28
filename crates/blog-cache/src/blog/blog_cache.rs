//! Redis-backed read-through cache for blog posts.
//!
//! Entries live under `"{prefix}: {blog_id}"` as JSON and expire after the
//! configured TTL. Writes to a post invalidate its entry.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use blog_core::entities::Blog;
use blog_core::error::DomainError;
use blog_core::traits::{BlogCache, RepoResult};
use blog_core::value_objects::{BlogId, UserId};

use crate::pool::{RedisPool, RedisPoolError};

/// Default TTL for cached posts (1 hour)
pub const DEFAULT_BLOG_TTL: Duration = Duration::from_secs(3600);

const DEFAULT_KEY_PREFIX: &str = "blog-api";

/// Stored form of a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedBlog {
    pub blog_id: BlogId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Blog> for CachedBlog {
    fn from(blog: &Blog) -> Self {
        Self {
            blog_id: blog.id,
            author_id: blog.author_id,
            title: blog.title.clone(),
            content: blog.content.clone(),
            image_url: blog.image_url.clone(),
            category: blog.category.clone(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<CachedBlog> for Blog {
    fn from(cached: CachedBlog) -> Self {
        Blog {
            id: cached.blog_id,
            author_id: cached.author_id,
            title: cached.title,
            content: cached.content,
            image_url: cached.image_url,
            category: cached.category,
            created_at: cached.created_at,
            updated_at: cached.updated_at,
        }
    }
}

/// Blog cache backed by the shared Redis pool
#[derive(Clone)]
pub struct RedisBlogCache {
    pool: RedisPool,
    key_prefix: String,
    ttl: Duration,
}

impl RedisBlogCache {
    /// Create a cache with the default prefix and TTL
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            ttl: DEFAULT_BLOG_TTL,
        }
    }

    /// Create a cache from blog-common config
    #[must_use]
    pub fn from_config(pool: RedisPool, config: &blog_common::CacheConfig) -> Self {
        Self {
            pool,
            key_prefix: config.key_prefix.clone(),
            ttl: config.blog_ttl(),
        }
    }

    fn key(&self, id: BlogId) -> String {
        format!("{}: {id}", self.key_prefix)
    }
}

fn cache_error(e: RedisPoolError) -> DomainError {
    DomainError::CacheError(e.to_string())
}

#[async_trait]
impl BlogCache for RedisBlogCache {
    async fn get(&self, id: BlogId) -> RepoResult<Option<Blog>> {
        let cached: Option<CachedBlog> = self
            .pool
            .get_json(&self.key(id))
            .await
            .map_err(cache_error)?;

        if cached.is_some() {
            tracing::debug!(blog_id = %id, "Blog cache hit");
        }

        Ok(cached.map(Blog::from))
    }

    async fn set(&self, blog: &Blog) -> RepoResult<()> {
        self.pool
            .set_json(&self.key(blog.id), &CachedBlog::from(blog), Some(self.ttl))
            .await
            .map_err(cache_error)
    }

    async fn invalidate(&self, id: BlogId) -> RepoResult<()> {
        let removed = self.pool.delete(&self.key(id)).await.map_err(cache_error)?;
        tracing::debug!(blog_id = %id, removed, "Blog cache invalidated");
        Ok(())
    }
}

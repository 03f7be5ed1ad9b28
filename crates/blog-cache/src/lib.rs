//! # blog-cache
//!
//! Redis layer: the shared connection pool and the blog post cache.
//!
//! ## Example
//!
//! ```ignore
//! use blog_cache::{RedisBlogCache, RedisPool, RedisPoolConfig};
//! use blog_core::traits::BlogCache;
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let cache = RedisBlogCache::new(pool);
//!
//! if let Some(blog) = cache.get(blog_id).await? {
//!     // served from Redis
//! }
//! ```

pub mod blog;
pub mod pool;

// Re-export pool types
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};

// Re-export cache types
pub use blog::{CachedBlog, RedisBlogCache, DEFAULT_BLOG_TTL};

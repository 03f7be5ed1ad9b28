//! Blog post cache

mod blog_cache;

pub use blog_cache::{CachedBlog, RedisBlogCache, DEFAULT_BLOG_TTL};

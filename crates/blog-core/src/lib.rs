//! # blog-core
//!
//! Domain layer containing entities, typed ids, and repository/cache traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Blog, BlogChanges, Comment, CommentDetails, User, UserComment};
pub use error::DomainError;
pub use traits::{
    BlogCache, BlogRepository, CommentRepository, RepoResult, UserCommentRepository, UserRepository,
};
pub use value_objects::{BlogId, CommentId, IdParseError, Page, PageRequest, UserId};

//! Repository and cache traits (ports)

mod cache;
mod repositories;

pub use cache::BlogCache;
pub use repositories::{
    BlogRepository, CommentRepository, RepoResult, UserCommentRepository, UserRepository,
};

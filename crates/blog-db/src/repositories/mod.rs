//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in blog-core.

mod blog;
mod comment;
mod error;
mod user;
mod user_comment;

pub use blog::PgBlogRepository;
pub use comment::PgCommentRepository;
pub use user::PgUserRepository;
pub use user_comment::PgUserCommentRepository;

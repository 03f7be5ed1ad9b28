//! Domain entities - core business objects

mod blog;
mod comment;
mod user;
mod user_comment;

pub use blog::{Blog, BlogChanges};
pub use comment::{Comment, CommentDetails};
pub use user::User;
pub use user_comment::UserComment;

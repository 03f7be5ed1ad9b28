//! Database models - SQLx-compatible structs for PostgreSQL tables

mod blog;
mod comment;
mod user;
mod user_comment;

pub use blog::BlogModel;
pub use comment::{CommentDetailsModel, CommentModel};
pub use user::UserModel;
pub use user_comment::UserCommentModel;

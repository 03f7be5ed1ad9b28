//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] for the duration of one call.

pub mod auth;
pub mod blog;
pub mod comment;
pub mod context;
pub mod error;
pub mod reaction;
pub mod user;

pub use auth::AuthService;
pub use blog::BlogService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::ReactionService;
pub use user::UserService;

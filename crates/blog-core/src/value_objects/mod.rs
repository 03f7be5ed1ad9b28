//! Value objects - immutable types that represent domain concepts

mod ids;
mod pagination;

pub use ids::{BlogId, CommentId, IdParseError, UserId};
pub use pagination::{Page, PageRequest};

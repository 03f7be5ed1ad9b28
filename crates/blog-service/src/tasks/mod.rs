//! Comment reaction tasks
//!
//! Likes and dislikes are not written during the HTTP request. The API
//! enqueues a task through [`CommentTaskDistributor`] and a worker applies it
//! later through the handlers in [`comment_handlers`].

pub mod distributor;
pub mod handlers;
pub mod payload;

pub use distributor::{
    reaction_options, CommentTaskDistributor, REACTION_DELAY, REACTION_MAX_RETRY, REACTION_QUEUE,
};
pub use handlers::{comment_handlers, ReactionTaskHandler};
pub use payload::{CommentTaskKind, ReactionPayload};

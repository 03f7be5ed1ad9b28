//! # blog-service
//!
//! Application layer: services over the `blog-core` ports, request and
//! response DTOs, and the comment reaction tasks shared by the API (which
//! enqueues them) and the worker (which runs them).

pub mod dto;
pub mod services;
pub mod tasks;

#[cfg(test)]
mod test_support;

pub use services::{
    AuthService, BlogService, CommentService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
pub use tasks::{comment_handlers, CommentTaskDistributor, CommentTaskKind, ReactionPayload};

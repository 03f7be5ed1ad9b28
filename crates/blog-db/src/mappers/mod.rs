//! Model to entity mappers
//!
//! `From<Model> for Entity` conversions between database rows and the
//! domain objects of `blog-core`.

mod blog;
mod comment;
mod user;
mod user_comment;

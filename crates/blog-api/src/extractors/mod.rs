//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, pagination and typed ids.

mod auth;
mod id;
mod pagination;
mod validated;

pub use auth::AuthUser;
pub use id::IdPath;
pub use pagination::{Pagination, PaginationParams};
pub use validated::ValidatedJson;

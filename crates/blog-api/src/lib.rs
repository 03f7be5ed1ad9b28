//! # blog-api
//!
//! REST API server built with Axum.
//!
//! Auth, blog and comment endpoints live under `/api/v1`; `/health` and
//! `/health/ready` sit at the root outside rate limiting. Comment likes and
//! dislikes are enqueued to the task queue and applied by `blog-worker`.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, serve, shutdown_signal};
pub use state::AppState;

//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{auth, blogs, comments, health};
use crate::state::AppState;

/// API router (health routes are mounted separately, outside rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(blog_routes())
        .merge(comment_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/me", get(auth::get_current_user))
        .route("/auth/:user_id", get(auth::get_user))
}

fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", post(blogs::create_blog).get(blogs::list_blogs))
        .route(
            "/blogs/:blog_id",
            get(blogs::get_blog)
                .patch(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments",
            post(comments::create_comment).get(comments::list_comments),
        )
        .route(
            "/comments/:comment_id",
            get(comments::get_comment)
                .patch(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/comments/:comment_id/like", patch(comments::like_comment))
        .route(
            "/comments/:comment_id/dislike",
            patch(comments::dislike_comment),
        )
}

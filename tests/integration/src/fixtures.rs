//! Test fixtures and data generators
//!
//! Request bodies are built here; responses are read back as the client sees
//! them, with ids kept as strings.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix for test data within this process
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            first_name: "Test".to_string(),
            last_name: format!("User{suffix}"),
            email: format!("test{}_{suffix}@example.com", std::process::id()),
            password: "secret-pass".to_string(),
            city: Some("Lisbon".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub user: CurrentUserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Option<String>,
    pub city: Option<String>,
}

/// Public profile; contact fields are never present
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

// ============================================================================
// Blogs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CreateBlogRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Integration post {suffix}"),
            content: "Body text long enough to pass validation.".to_string(),
            category: Some("tests".to_string()),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateBlogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlogResponse {
    pub blog_id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BlogListResponse {
    pub total_count: i64,
    pub total_pages: i64,
    pub page: u32,
    pub size: u32,
    pub has_more: bool,
    pub blogs: Vec<BlogResponse>,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub blog_id: String,
    pub message: String,
}

impl CreateCommentRequest {
    pub fn on(blog_id: &str) -> Self {
        Self {
            blog_id: blog_id.to_string(),
            message: format!("A thoughtful comment #{}", unique_suffix()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateCommentRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub comment_id: String,
    pub author_id: String,
    pub blog_id: String,
    pub message: String,
    pub likes: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentDetailsResponse {
    pub comment_id: String,
    pub author_id: String,
    pub author: String,
    pub blog_id: String,
    pub message: String,
    pub likes: i64,
}

#[derive(Debug, Deserialize)]
pub struct CommentListResponse {
    pub total_count: i64,
    pub page: u32,
    pub has_more: bool,
    pub comments: Vec<CommentDetailsResponse>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

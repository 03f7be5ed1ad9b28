//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use blog_core::{BlogId, CommentId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset pagination metadata, flattened into list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total_count: i64,
    pub total_pages: i64,
    pub page: u32,
    pub size: u32,
    pub has_more: bool,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: CurrentUserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            user,
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user profile (no contact details)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user (full profile, never the password)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postcode: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub login_date: DateTime<Utc>,
}

// ============================================================================
// Blog Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BlogResponse {
    pub blog_id: BlogId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlogListResponse {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub blogs: Vec<BlogResponse>,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// A freshly created or edited comment
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub comment_id: CommentId,
    pub author_id: UserId,
    pub blog_id: BlogId,
    pub message: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A comment as read back, with author info and like count
#[derive(Debug, Clone, Serialize)]
pub struct CommentDetailsResponse {
    pub comment_id: CommentId,
    pub author_id: UserId,
    pub author: String,
    pub blog_id: BlogId,
    pub avatar_url: Option<String>,
    pub message: String,
    pub likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    #[serde(flatten)]
    pub meta: PageMeta,
    pub comments: Vec<CommentDetailsResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Outcome of one dependency check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Unhealthy,
}

impl From<bool> for CheckStatus {
    fn from(ok: bool) -> Self {
        if ok {
            Self::Healthy
        } else {
            Self::Unhealthy
        }
    }
}

/// Liveness: the process is up and serving
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: CheckStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: CheckStatus::Healthy,
            timestamp: Utc::now(),
        }
    }
}

/// Readiness: PostgreSQL and Redis both answer
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: CheckStatus,
    pub redis: CheckStatus,
}

impl ReadinessResponse {
    pub fn new(database: CheckStatus, redis: CheckStatus) -> Self {
        let ready = database == CheckStatus::Healthy && redis == CheckStatus::Healthy;
        Self {
            status: if ready { "ready" } else { "not_ready" },
            timestamp: Utc::now(),
            database,
            redis,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use blog_core::BlogId;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 30, message = "First name must be 1-30 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 30, message = "Last name must be 1-30 characters"))]
    pub last_name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 60, message = "Email must be at most 60 characters")
    )]
    pub email: String,

    /// Length is checked after trimming by the auth service
    pub password: String,

    #[validate(length(max = 10, message = "Role must be at most 10 characters"))]
    pub role: Option<String>,

    #[validate(length(max = 1024, message = "About must be at most 1024 characters"))]
    pub about: Option<String>,

    #[validate(
        url(message = "Avatar must be a URL"),
        length(max = 512, message = "Avatar must be at most 512 characters")
    )]
    pub avatar: Option<String>,

    #[validate(length(max = 20, message = "Phone number must be at most 20 characters"))]
    pub phone_number: Option<String>,

    #[validate(length(max = 250, message = "Address must be at most 250 characters"))]
    pub address: Option<String>,

    #[validate(length(max = 24, message = "City must be at most 24 characters"))]
    pub city: Option<String>,

    #[validate(length(max = 24, message = "Country must be at most 24 characters"))]
    pub country: Option<String>,

    #[validate(length(max = 10, message = "Gender must be at most 10 characters"))]
    pub gender: Option<String>,

    pub postcode: Option<i32>,

    /// `YYYY-MM-DD`
    pub birthday: Option<NaiveDate>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

// ============================================================================
// Blog Requests
// ============================================================================

/// Create blog request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(length(min = 10, message = "Title must be at least 10 characters"))]
    pub title: String,

    #[validate(length(min = 20, message = "Content must be at least 20 characters"))]
    pub content: String,

    #[validate(
        url(message = "Image URL must be a URL"),
        length(max = 512, message = "Image URL must be at most 512 characters")
    )]
    pub image_url: Option<String>,

    #[validate(length(max = 10, message = "Category must be at most 10 characters"))]
    pub category: Option<String>,
}

/// Partial blog update; absent or empty fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[validate(custom(function = "empty_or_title"))]
    pub title: Option<String>,

    #[validate(custom(function = "empty_or_content"))]
    pub content: Option<String>,

    #[validate(length(max = 512, message = "Image URL must be at most 512 characters"))]
    pub image_url: Option<String>,

    #[validate(length(max = 10, message = "Category must be at most 10 characters"))]
    pub category: Option<String>,
}

fn empty_or_min(value: &str, min: usize, message: &'static str) -> Result<(), validator::ValidationError> {
    let len = value.trim().chars().count();
    if len == 0 || len >= min {
        Ok(())
    } else {
        let mut err = validator::ValidationError::new("length");
        err.message = Some(message.into());
        Err(err)
    }
}

fn empty_or_title(value: &str) -> Result<(), validator::ValidationError> {
    empty_or_min(value, 10, "Title must be at least 10 characters")
}

fn empty_or_content(value: &str) -> Result<(), validator::ValidationError> {
    empty_or_min(value, 20, "Content must be at least 20 characters")
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub blog_id: BlogId,

    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

/// Edit comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

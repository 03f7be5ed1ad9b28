//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use blog_core::{Blog, Comment, CommentDetails, Page, User};

use super::responses::{
    BlogListResponse, BlogResponse, CommentDetailsResponse, CommentListResponse, CommentResponse,
    CurrentUserResponse, PageMeta, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
            about: user.about.clone(),
            avatar: user.avatar.clone(),
            city: user.city.clone(),
            country: user.country.clone(),
            gender: user.gender.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            about: user.about.clone(),
            avatar: user.avatar.clone(),
            phone_number: user.phone_number.clone(),
            address: user.address.clone(),
            city: user.city.clone(),
            country: user.country.clone(),
            gender: user.gender.clone(),
            postcode: user.postcode,
            birthday: user.birthday,
            created_at: user.created_at,
            updated_at: user.updated_at,
            login_date: user.login_date,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Pagination
// ============================================================================

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            total_count: page.total_count,
            total_pages: page.total_pages(),
            page: page.request.page,
            size: page.request.size,
            has_more: page.has_more(),
        }
    }
}

// ============================================================================
// Blog Mappers
// ============================================================================

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            blog_id: blog.id,
            author_id: blog.author_id,
            title: blog.title,
            content: blog.content,
            image_url: blog.image_url,
            category: blog.category,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<Page<Blog>> for BlogListResponse {
    fn from(page: Page<Blog>) -> Self {
        Self {
            meta: PageMeta::from(&page),
            blogs: page.items.into_iter().map(BlogResponse::from).collect(),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            comment_id: comment.id,
            author_id: comment.author_id,
            blog_id: comment.blog_id,
            message: comment.message,
            likes: 0,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<CommentDetails> for CommentDetailsResponse {
    fn from(details: CommentDetails) -> Self {
        let CommentDetails {
            comment,
            author,
            avatar_url,
            likes,
        } = details;

        Self {
            comment_id: comment.id,
            author_id: comment.author_id,
            author,
            blog_id: comment.blog_id,
            avatar_url,
            message: comment.message,
            likes,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Page<CommentDetails>> for CommentListResponse {
    fn from(page: Page<CommentDetails>) -> Self {
        Self {
            meta: PageMeta::from(&page),
            comments: page
                .items
                .into_iter()
                .map(CommentDetailsResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::{BlogId, PageRequest, UserId};

    #[test]
    fn test_public_user_hides_contact_details() {
        let mut user = User::new(
            UserId::new(),
            "Ada".to_string(),
            "Lovelace".to_string(),
            "ada@example.com".to_string(),
        );
        user.phone_number = Some("555-0100".to_string());

        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("phone_number").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["first_name"], "Ada");
    }

    #[test]
    fn test_blog_list_shape() {
        let author = UserId::new();
        let blogs = (0..3)
            .map(|i| {
                Blog::new(
                    BlogId::new(),
                    author,
                    format!("Post number {i} title"),
                    "content long enough to pass".to_string(),
                )
            })
            .collect();
        let page = Page::new(blogs, 23, PageRequest::new(2, 10));

        let json = serde_json::to_value(BlogListResponse::from(page)).unwrap();
        assert_eq!(json["total_count"], 23);
        assert_eq!(json["total_pages"], 3);
        assert_eq!(json["page"], 2);
        assert_eq!(json["size"], 10);
        assert_eq!(json["has_more"], true);
        assert_eq!(json["blogs"].as_array().unwrap().len(), 3);
    }
}

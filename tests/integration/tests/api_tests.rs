//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::Duration;

use integration_tests::{
    assert_json, assert_status, check_test_env, eventually, fixtures::*, TestServer,
};
use reqwest::StatusCode;

/// Reaction tasks are scheduled 5 s out, so allow well beyond that
const REACTION_WAIT: Duration = Duration::from_secs(30);

async fn register(server: &TestServer) -> AuthResponse {
    let response = server
        .post("/api/v1/auth/register", &RegisterRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_blog(server: &TestServer, token: &str) -> BlogResponse {
    let response = server
        .post_auth("/api/v1/blogs", token, &CreateBlogRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_comment(server: &TestServer, token: &str, blog_id: &str) -> CommentResponse {
    let response = server
        .post_auth("/api/v1/comments", token, &CreateCommentRequest::on(blog_id))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn get_comment(server: &TestServer, comment_id: &str) -> CommentDetailsResponse {
    let response = server
        .get(&format!("/api/v1/comments/{comment_id}"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

/// Wait until every queued reaction has been handled
async fn drain_queue(server: &TestServer) {
    eventually(REACTION_WAIT, || async {
        Ok((server.outstanding_tasks().await? == 0).then_some(()))
    })
    .await
    .unwrap();
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    let expected_email = request.email.clone();
    request.email = request.email.to_uppercase();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.email, expected_email);
    assert_eq!(auth.user.first_name, request.first_name);
    assert_eq!(auth.user.role.as_deref(), Some("user"));
    assert_eq!(auth.user.city.as_deref(), Some("Lisbon"));
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_short_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "  abc  ".to_string();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &register_req).await.unwrap();
    let registered: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.user_id, registered.user.user_id);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &register_req).await.unwrap();

    let wrong_password = LoginRequest {
        email: register_req.email.clone(),
        password: "not-the-password".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &wrong_password).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let unknown = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "whatever".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &unknown).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let refresh_req = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/api/v1/auth/refresh", &refresh_req).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.user_id, auth.user.user_id);

    // An access token is not accepted as a refresh token
    let bogus = RefreshTokenRequest {
        refresh_token: auth.access_token,
    };
    let response = server.post("/api/v1/auth/refresh", &bogus).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_current_user_and_public_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .get_auth("/api/v1/auth/me", &auth.access_token)
        .await
        .unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.user_id, auth.user.user_id);
    assert_eq!(me.email, auth.user.email);

    let response = server
        .get(&format!("/api/v1/auth/{}", auth.user.user_id))
        .await
        .unwrap();
    let public: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.user_id, auth.user.user_id);
    assert_eq!(public.last_name, auth.user.last_name);
    assert!(public.email.is_none());
}

#[tokio::test]
async fn test_me_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/auth/me").await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_AUTHORIZATION");
}

// ============================================================================
// Blog Tests
// ============================================================================

#[tokio::test]
async fn test_blog_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let blog = create_blog(&server, &auth.access_token).await;
    assert_eq!(blog.author_id, auth.user.user_id);

    // Read twice: the second read is served from the cache
    for _ in 0..2 {
        let response = server
            .get(&format!("/api/v1/blogs/{}", blog.blog_id))
            .await
            .unwrap();
        let fetched: BlogResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(fetched.title, blog.title);
    }

    // Partial update keeps the content; the cached copy must not be served stale
    let update = UpdateBlogRequest {
        title: Some("An updated, longer title".to_string()),
        content: None,
    };
    let response = server
        .patch_auth(
            &format!("/api/v1/blogs/{}", blog.blog_id),
            &auth.access_token,
            &update,
        )
        .await
        .unwrap();
    let updated: BlogResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "An updated, longer title");
    assert_eq!(updated.content, blog.content);

    let response = server
        .get(&format!("/api/v1/blogs/{}", blog.blog_id))
        .await
        .unwrap();
    let fetched: BlogResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, "An updated, longer title");

    let response = server
        .delete_auth(&format!("/api/v1/blogs/{}", blog.blog_id), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/v1/blogs/{}", blog.blog_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_blog_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let other = register(&server).await;
    let blog = create_blog(&server, &owner.access_token).await;

    let update = UpdateBlogRequest {
        title: Some("Hijacked title of a post".to_string()),
        content: None,
    };
    let response = server
        .patch_auth(
            &format!("/api/v1/blogs/{}", blog.blog_id),
            &other.access_token,
            &update,
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_BLOG_AUTHOR");

    let response = server
        .delete_auth(&format!("/api/v1/blogs/{}", blog.blog_id), &other.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_blog_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let request = CreateBlogRequest {
        title: "short".to_string(),
        content: "Body text long enough to pass validation.".to_string(),
        category: None,
    };
    let response = server
        .post_auth("/api/v1/blogs", &auth.access_token, &request)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_blog_list_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    for _ in 0..3 {
        create_blog(&server, &auth.access_token).await;
    }

    let response = server.get("/api/v1/blogs?page=1&size=2").await.unwrap();
    let page: BlogListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.size, 2);
    assert_eq!(page.blogs.len(), 2);
    assert!(page.total_count >= 3);
    assert!(page.total_pages >= 2);
    assert!(page.has_more);

    let response = server.get("/api/v1/blogs?size=500").await.unwrap();
    let page: BlogListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.size, 100);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_crud() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let blog = create_blog(&server, &auth.access_token).await;
    let comment = create_comment(&server, &auth.access_token, &blog.blog_id).await;
    assert_eq!(comment.blog_id, blog.blog_id);
    assert_eq!(comment.likes, 0);

    let details = get_comment(&server, &comment.comment_id).await;
    assert_eq!(details.author_id, auth.user.user_id);
    assert!(details.author.contains(&auth.user.last_name));
    assert_eq!(details.likes, 0);

    let update = UpdateCommentRequest {
        message: "An edited comment message".to_string(),
    };
    let response = server
        .patch_auth(
            &format!("/api/v1/comments/{}", comment.comment_id),
            &auth.access_token,
            &update,
        )
        .await
        .unwrap();
    let edited: CommentDetailsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.message, "An edited comment message");

    let response = server
        .get(&format!("/api/v1/comments?blog_id={}&page=1&size=10", blog.blog_id))
        .await
        .unwrap();
    let list: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list.total_count, 1);
    assert_eq!(list.comments[0].comment_id, comment.comment_id);
    assert!(!list.has_more);

    let response = server
        .delete_auth(
            &format!("/api/v1/comments/{}", comment.comment_id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/v1/comments/{}", comment.comment_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_comment_on_missing_blog() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let request = CreateCommentRequest::on("00000000-0000-4000-8000-000000000000");
    let response = server
        .post_auth("/api/v1/comments", &auth.access_token, &request)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_BLOG");
}

#[tokio::test]
async fn test_comment_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let other = register(&server).await;
    let blog = create_blog(&server, &owner.access_token).await;
    let comment = create_comment(&server, &owner.access_token, &blog.blog_id).await;

    let update = UpdateCommentRequest {
        message: "Someone else's words here".to_string(),
    };
    let response = server
        .patch_auth(
            &format!("/api/v1/comments/{}", comment.comment_id),
            &other.access_token,
            &update,
        )
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_COMMENT_AUTHOR");
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_like_is_enqueued_without_worker() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let blog = create_blog(&server, &auth.access_token).await;
    let comment = create_comment(&server, &auth.access_token, &blog.blog_id).await;

    let response = server
        .patch_empty(
            &format!("/api/v1/comments/{}/like", comment.comment_id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Nothing processes the queue, so the like stays pending
    assert_eq!(server.outstanding_tasks().await.unwrap(), 1);
    assert_eq!(get_comment(&server, &comment.comment_id).await.likes, 0);
}

#[tokio::test]
async fn test_like_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .client
        .patch(format!(
            "{}/api/v1/comments/00000000-0000-4000-8000-000000000000/like",
            server.base_url()
        ))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(server.outstanding_tasks().await.unwrap(), 0);
}

#[tokio::test]
async fn test_like_then_dislike_through_worker() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with_worker()
        .await
        .expect("Failed to start server");
    let author = register(&server).await;
    let reader = register(&server).await;
    let blog = create_blog(&server, &author.access_token).await;
    let comment = create_comment(&server, &author.access_token, &blog.blog_id).await;
    let like_path = format!("/api/v1/comments/{}/like", comment.comment_id);
    let dislike_path = format!("/api/v1/comments/{}/dislike", comment.comment_id);

    // Liking twice still counts once
    for _ in 0..2 {
        let response = server
            .patch_empty(&like_path, &reader.access_token)
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
    drain_queue(&server).await;
    assert_eq!(get_comment(&server, &comment.comment_id).await.likes, 1);

    // A second user adds a second like
    let response = server
        .patch_empty(&like_path, &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    drain_queue(&server).await;
    assert_eq!(get_comment(&server, &comment.comment_id).await.likes, 2);

    let response = server
        .patch_empty(&dislike_path, &reader.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    drain_queue(&server).await;
    assert_eq!(get_comment(&server, &comment.comment_id).await.likes, 1);
}

#[tokio::test]
async fn test_dislike_without_like_is_noop() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with_worker()
        .await
        .expect("Failed to start server");
    let auth = register(&server).await;
    let blog = create_blog(&server, &auth.access_token).await;
    let comment = create_comment(&server, &auth.access_token, &blog.blog_id).await;

    let response = server
        .patch_empty(
            &format!("/api/v1/comments/{}/dislike", comment.comment_id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    drain_queue(&server).await;
    assert_eq!(get_comment(&server, &comment.comment_id).await.likes, 0);
    assert_eq!(server.archived_tasks("critical").await.unwrap(), 0);
}

#[tokio::test]
async fn test_like_on_missing_comment_is_archived() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with_worker()
        .await
        .expect("Failed to start server");
    let auth = register(&server).await;

    // The endpoint does not look the comment up, it only enqueues
    let response = server
        .patch_empty(
            "/api/v1/comments/00000000-0000-4000-8000-000000000000/like",
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    drain_queue(&server).await;
    assert_eq!(server.archived_tasks("critical").await.unwrap(), 1);
}

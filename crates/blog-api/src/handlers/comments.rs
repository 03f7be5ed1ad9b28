//! Comment handlers
//!
//! Like and dislike only enqueue a task; the worker applies it later.

use axum::{
    extract::{Query, State},
    Json,
};
use blog_core::{BlogId, CommentId};
use blog_service::dto::{
    CommentDetailsResponse, CommentListResponse, CommentResponse, CreateCommentRequest,
    UpdateCommentRequest,
};
use blog_service::CommentService;
use serde::Deserialize;
use tracing::debug;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Query for listing a post's comments; `page`/`size` come from [`Pagination`]
#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    pub blog_id: Option<String>,
}

impl ListCommentsQuery {
    fn blog_id(&self) -> Result<BlogId, ApiError> {
        let raw = self
            .blog_id
            .as_deref()
            .ok_or_else(|| ApiError::invalid_query("blog_id is required"))?;
        raw.parse()
            .map_err(|e: blog_core::IdParseError| ApiError::invalid_query(e.to_string()))
    }
}

/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.create_comment(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /comments?blog_id=&page=&size=
pub async fn list_comments(
    State(state): State<AppState>,
    Query(query): Query<ListCommentsQuery>,
    Pagination(page): Pagination,
) -> ApiResult<Json<CommentListResponse>> {
    let blog_id = query.blog_id()?;
    let service = CommentService::new(state.service_context());
    let response = service.list_comments(blog_id, page).await?;
    Ok(Json(response))
}

/// GET /comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<Json<CommentDetailsResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service.get_comment(comment_id).await?;
    Ok(Json(response))
}

/// PATCH /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentDetailsResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(auth.user_id, comment_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(auth.user_id, comment_id).await?;
    Ok(NoContent)
}

/// PATCH /comments/{comment_id}/like
///
/// Responds as soon as the task is enqueued. The comment is not looked up
/// here; a like on a missing comment is dropped by the worker.
pub async fn like_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    let task = service.like_comment(auth.user_id, comment_id).await?;
    debug!(task_id = %task.id, queue = %task.queue, "Like enqueued");
    Ok(NoContent)
}

/// PATCH /comments/{comment_id}/dislike
pub async fn dislike_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    let task = service.dislike_comment(auth.user_id, comment_id).await?;
    debug!(task_id = %task.id, queue = %task.queue, "Dislike enqueued");
    Ok(NoContent)
}

//! Blog post handlers

use axum::{extract::State, Json};
use blog_core::BlogId;
use blog_service::dto::{BlogListResponse, BlogResponse, CreateBlogRequest, UpdateBlogRequest};
use blog_service::BlogService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /blogs
pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBlogRequest>,
) -> ApiResult<Created<Json<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service.create_blog(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /blogs?page=&size=
pub async fn list_blogs(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<Json<BlogListResponse>> {
    let service = BlogService::new(state.service_context());
    let response = service.list_blogs(page).await?;
    Ok(Json(response))
}

/// GET /blogs/{blog_id}
pub async fn get_blog(
    State(state): State<AppState>,
    IdPath(blog_id): IdPath<BlogId>,
) -> ApiResult<Json<BlogResponse>> {
    let service = BlogService::new(state.service_context());
    let response = service.get_blog(blog_id).await?;
    Ok(Json(response))
}

/// PATCH /blogs/{blog_id}
///
/// Only the author may edit. Empty fields keep their stored value.
pub async fn update_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(blog_id): IdPath<BlogId>,
    ValidatedJson(request): ValidatedJson<UpdateBlogRequest>,
) -> ApiResult<Json<BlogResponse>> {
    let service = BlogService::new(state.service_context());
    let response = service.update_blog(auth.user_id, blog_id, request).await?;
    Ok(Json(response))
}

/// DELETE /blogs/{blog_id}
pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(blog_id): IdPath<BlogId>,
) -> ApiResult<NoContent> {
    let service = BlogService::new(state.service_context());
    service.delete_blog(auth.user_id, blog_id).await?;
    Ok(NoContent)
}

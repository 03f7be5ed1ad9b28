//! Comment service
//!
//! Comment CRUD plus the HTTP side of reactions: liking or disliking only
//! enqueues a task; the reaction store is written later by a worker.

use blog_core::entities::Comment;
use blog_core::{BlogId, CommentId, DomainError, PageRequest, UserId};
use blog_queue::TaskInfo;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CommentDetailsResponse, CommentListResponse, CommentResponse, CreateCommentRequest,
    UpdateCommentRequest,
};
use crate::tasks::ReactionPayload;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new `CommentService`
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on an existing post
    #[instrument(skip(self, request), fields(blog_id = %request.blog_id))]
    pub async fn create_comment(
        &self,
        author_id: UserId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        request.validate()?;

        if self.ctx.blog_repo().find_by_id(request.blog_id).await?.is_none() {
            return Err(DomainError::BlogNotFound(request.blog_id).into());
        }

        let comment = Comment::new(CommentId::new(), author_id, request.blog_id, request.message);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, "Comment created");
        Ok(CommentResponse::from(comment))
    }

    /// Get a comment with its author and like count
    #[instrument(skip(self))]
    pub async fn get_comment(&self, comment_id: CommentId) -> ServiceResult<CommentDetailsResponse> {
        let details = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        Ok(CommentDetailsResponse::from(details))
    }

    /// Page through the comments of a post
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        blog_id: BlogId,
        page: PageRequest,
    ) -> ServiceResult<CommentListResponse> {
        let page = self.ctx.comment_repo().list_by_blog(blog_id, page).await?;
        Ok(CommentListResponse::from(page))
    }

    /// Edit the message of a comment owned by `user_id`
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        user_id: UserId,
        comment_id: CommentId,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentDetailsResponse> {
        request.validate()?;

        let mut details = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        if !details.comment.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        details.comment.edit(request.message);
        self.ctx.comment_repo().update(&details.comment).await?;

        info!("Comment updated");
        Ok(CommentDetailsResponse::from(details))
    }

    /// Delete a comment owned by `user_id`
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, user_id: UserId, comment_id: CommentId) -> ServiceResult<()> {
        let details = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        if !details.comment.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        if !self.ctx.comment_repo().delete(comment_id).await? {
            return Err(DomainError::CommentNotFound(comment_id).into());
        }

        info!("Comment deleted");
        Ok(())
    }

    /// Schedule a like. Returns once the task is durably enqueued.
    #[instrument(skip(self))]
    pub async fn like_comment(&self, user_id: UserId, comment_id: CommentId) -> ServiceResult<TaskInfo> {
        let payload = ReactionPayload::new(user_id, comment_id);
        Ok(self.ctx.distributor().distribute_like(&payload).await?)
    }

    /// Schedule a dislike. Returns once the task is durably enqueued.
    #[instrument(skip(self))]
    pub async fn dislike_comment(
        &self,
        user_id: UserId,
        comment_id: CommentId,
    ) -> ServiceResult<TaskInfo> {
        let payload = ReactionPayload::new(user_id, comment_id);
        Ok(self.ctx.distributor().distribute_dislike(&payload).await?)
    }
}

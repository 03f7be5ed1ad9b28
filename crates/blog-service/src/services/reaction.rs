//! Reaction service
//!
//! Applies likes and dislikes to the reaction store. Called only from queue
//! workers, which may deliver the same task more than once, so both
//! operations are idempotent single statements.

use blog_core::traits::UserCommentRepository;
use blog_core::{CommentId, UserComment, UserId};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    reactions: &'a dyn UserCommentRepository,
}

impl<'a> ReactionService<'a> {
    /// Create a new `ReactionService`
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self::with_repo(ctx.user_comment_repo())
    }

    /// Build directly over a reaction store, as task handlers do
    pub fn with_repo(reactions: &'a dyn UserCommentRepository) -> Self {
        Self { reactions }
    }

    /// Record that `user_id` likes `comment_id`.
    ///
    /// Returns `true` if a row was written, `false` if the like already existed.
    #[instrument(skip(self))]
    pub async fn like(&self, user_id: UserId, comment_id: CommentId) -> ServiceResult<bool> {
        Self::check_ids(user_id, comment_id)?;

        let written = self
            .reactions
            .insert_if_absent(&UserComment::new(user_id, comment_id))
            .await?;

        debug!(written, "Like applied");
        Ok(written)
    }

    /// Remove `user_id`'s like from `comment_id`.
    ///
    /// Returns `true` if a row was removed. A missing row is not an error.
    #[instrument(skip(self))]
    pub async fn dislike(&self, user_id: UserId, comment_id: CommentId) -> ServiceResult<bool> {
        Self::check_ids(user_id, comment_id)?;

        let removed = self
            .reactions
            .delete_if_present(user_id, comment_id)
            .await?;

        debug!(removed, "Dislike applied");
        Ok(removed)
    }

    /// Current like count of a comment
    #[instrument(skip(self))]
    pub async fn likes(&self, comment_id: CommentId) -> ServiceResult<i64> {
        Ok(self.reactions.count_by_comment(comment_id).await?)
    }

    fn check_ids(user_id: UserId, comment_id: CommentId) -> ServiceResult<()> {
        if user_id.is_nil() {
            return Err(ServiceError::validation("user id must not be nil"));
        }
        if comment_id.is_nil() {
            return Err(ServiceError::validation("comment id must not be nil"));
        }
        Ok(())
    }
}

//! PostgreSQL implementation of UserCommentRepository
//!
//! The `(user_id, comment_id)` primary key carries idempotence: a like is an
//! `INSERT ... ON CONFLICT DO NOTHING` and a dislike is a plain `DELETE`, so
//! replays and concurrent duplicates are no-ops rather than errors.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::UserComment;
use blog_core::error::DomainError;
use blog_core::traits::{RepoResult, UserCommentRepository};
use blog_core::value_objects::{CommentId, UserId};

use crate::models::UserCommentModel;

use super::error::{fk, map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of UserCommentRepository
#[derive(Clone)]
pub struct PgUserCommentRepository {
    pool: PgPool,
}

impl PgUserCommentRepository {
    /// Create a new PgUserCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserCommentRepository for PgUserCommentRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        user_id: UserId,
        comment_id: CommentId,
    ) -> RepoResult<Option<UserComment>> {
        let result = sqlx::query_as::<_, UserCommentModel>(
            r"
            SELECT user_id, comment_id, created_at, updated_at
            FROM user_comments
            WHERE user_id = $1 AND comment_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(comment_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserComment::from))
    }

    #[instrument(skip(self, like), fields(user_id = %like.user_id, comment_id = %like.comment_id))]
    async fn insert_if_absent(&self, like: &UserComment) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO user_comments (user_id, comment_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, comment_id) DO NOTHING
            ",
        )
        .bind(like.user_id.into_inner())
        .bind(like.comment_id.into_inner())
        .bind(like.created_at)
        .bind(like.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                fk::USER_COMMENTS_USER => Some(DomainError::UserNotFound(like.user_id)),
                fk::USER_COMMENTS_COMMENT => Some(DomainError::CommentNotFound(like.comment_id)),
                _ => None,
            })
        })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_if_present(&self, user_id: UserId, comment_id: CommentId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM user_comments WHERE user_id = $1 AND comment_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(comment_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn count_by_comment(&self, comment_id: CommentId) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM user_comments WHERE comment_id = $1
            ",
        )
        .bind(comment_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }
}

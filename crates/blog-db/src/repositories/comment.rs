//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{Comment, CommentDetails};
use blog_core::error::DomainError;
use blog_core::traits::{CommentRepository, RepoResult};
use blog_core::value_objects::{BlogId, CommentId, Page, PageRequest};

use crate::models::CommentDetailsModel;

use super::error::{fk, map_db_error, map_foreign_key_violation};

/// Comment columns joined with author name, avatar and the derived like count
const DETAILS_SELECT: &str = r"
    SELECT c.comment_id, c.author_id, c.blog_id, c.message, c.created_at, c.updated_at,
           CONCAT(u.first_name, ' ', u.last_name) AS author,
           u.avatar AS avatar_url,
           (SELECT COUNT(*) FROM user_comments uc WHERE uc.comment_id = c.comment_id) AS likes
    FROM comments c
    LEFT JOIN users u ON u.user_id = c.author_id
";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<CommentDetails>> {
        let result = sqlx::query_as::<_, CommentDetailsModel>(&format!(
            "{DETAILS_SELECT} WHERE c.comment_id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CommentDetails::from))
    }

    #[instrument(skip(self))]
    async fn list_by_blog(
        &self,
        blog_id: BlogId,
        page: PageRequest,
    ) -> RepoResult<Page<CommentDetails>> {
        let total_count =
            sqlx::query_scalar::<_, i64>(r"SELECT COUNT(*) FROM comments WHERE blog_id = $1")
                .bind(blog_id.into_inner())
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        if total_count == 0 {
            return Ok(Page::empty(page));
        }

        let rows = sqlx::query_as::<_, CommentDetailsModel>(&format!(
            "{DETAILS_SELECT} WHERE c.blog_id = $1 ORDER BY c.updated_at, c.comment_id OFFSET $2 LIMIT $3"
        ))
        .bind(blog_id.into_inner())
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(CommentDetails::from).collect(),
            total_count,
            page,
        ))
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (comment_id, author_id, blog_id, message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(comment.blog_id.into_inner())
        .bind(&comment.message)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| match constraint {
                fk::COMMENTS_AUTHOR => Some(DomainError::UserNotFound(comment.author_id)),
                fk::COMMENTS_BLOG => Some(DomainError::BlogNotFound(comment.blog_id)),
                _ => None,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE comments SET message = $2, updated_at = $3 WHERE comment_id = $1
            ",
        )
        .bind(comment.id.into_inner())
        .bind(&comment.message)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: CommentId) -> RepoResult<bool> {
        let result = sqlx::query(r"DELETE FROM comments WHERE comment_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

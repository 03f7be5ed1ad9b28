//! PostgreSQL implementation of BlogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::Blog;
use blog_core::error::DomainError;
use blog_core::traits::{BlogRepository, RepoResult};
use blog_core::value_objects::{BlogId, Page, PageRequest};

use crate::models::BlogModel;

use super::error::{fk, map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of BlogRepository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    /// Create a new PgBlogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BlogId) -> RepoResult<Option<Blog>> {
        let result = sqlx::query_as::<_, BlogModel>(
            r"
            SELECT blog_id, author_id, title, content, image_url, category, created_at, updated_at
            FROM blogs
            WHERE blog_id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Blog::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> RepoResult<Page<Blog>> {
        let total_count = sqlx::query_scalar::<_, i64>(r"SELECT COUNT(*) FROM blogs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        if total_count == 0 {
            return Ok(Page::empty(page));
        }

        let rows = sqlx::query_as::<_, BlogModel>(
            r"
            SELECT blog_id, author_id, title, content, image_url, category, created_at, updated_at
            FROM blogs
            ORDER BY created_at, blog_id
            OFFSET $1 LIMIT $2
            ",
        )
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(
            rows.into_iter().map(Blog::from).collect(),
            total_count,
            page,
        ))
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn create(&self, blog: &Blog) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO blogs (blog_id, author_id, title, content, image_url, category, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(blog.id.into_inner())
        .bind(blog.author_id.into_inner())
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(&blog.image_url)
        .bind(&blog.category)
        .bind(blog.created_at)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |constraint| {
                (constraint == fk::BLOGS_AUTHOR).then(|| DomainError::UserNotFound(blog.author_id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, blog), fields(blog_id = %blog.id))]
    async fn update(&self, blog: &Blog) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE blogs
            SET title = $2, content = $3, image_url = $4, category = $5, updated_at = $6
            WHERE blog_id = $1
            ",
        )
        .bind(blog.id.into_inner())
        .bind(&blog.title)
        .bind(&blog.content)
        .bind(&blog.image_url)
        .bind(&blog.category)
        .bind(blog.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BlogNotFound(blog.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: BlogId) -> RepoResult<bool> {
        let result = sqlx::query(r"DELETE FROM blogs WHERE blog_id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

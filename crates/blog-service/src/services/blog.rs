//! Blog service
//!
//! Post CRUD. Reads go through the blog cache; writes invalidate it. The
//! cache is best effort: its failures are logged and never fail a request.

use blog_core::entities::{Blog, BlogChanges};
use blog_core::{BlogId, DomainError, PageRequest, UserId};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::dto::{BlogListResponse, BlogResponse, CreateBlogRequest, UpdateBlogRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Blog service
pub struct BlogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BlogService<'a> {
    /// Create a new `BlogService`
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post authored by `author_id`
    #[instrument(skip(self, request))]
    pub async fn create_blog(
        &self,
        author_id: UserId,
        request: CreateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        request.validate()?;

        let mut blog = Blog::new(BlogId::new(), author_id, request.title, request.content);
        blog.image_url = request.image_url.filter(|v| !v.trim().is_empty());
        blog.category = request.category.filter(|v| !v.trim().is_empty());

        self.ctx.blog_repo().create(&blog).await?;

        info!(blog_id = %blog.id, "Blog created");
        Ok(BlogResponse::from(blog))
    }

    /// Get a post, serving from cache when possible
    #[instrument(skip(self))]
    pub async fn get_blog(&self, blog_id: BlogId) -> ServiceResult<BlogResponse> {
        match self.ctx.blog_cache().get(blog_id).await {
            Ok(Some(blog)) => {
                debug!("Blog cache hit");
                return Ok(BlogResponse::from(blog));
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Blog cache read failed"),
        }

        let blog = self.find(blog_id).await?;

        if let Err(e) = self.ctx.blog_cache().set(&blog).await {
            warn!(error = %e, "Blog cache write failed");
        }

        Ok(BlogResponse::from(blog))
    }

    /// Page through all posts, oldest first
    #[instrument(skip(self))]
    pub async fn list_blogs(&self, page: PageRequest) -> ServiceResult<BlogListResponse> {
        let page = self.ctx.blog_repo().list(page).await?;
        Ok(BlogListResponse::from(page))
    }

    /// Partially update a post owned by `user_id`
    #[instrument(skip(self, request))]
    pub async fn update_blog(
        &self,
        user_id: UserId,
        blog_id: BlogId,
        request: UpdateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        request.validate()?;

        let mut blog = self.find(blog_id).await?;
        if !blog.is_author(user_id) {
            return Err(DomainError::NotBlogAuthor.into());
        }

        blog.apply(BlogChanges {
            title: request.title,
            content: request.content,
            image_url: request.image_url,
            category: request.category,
        });
        self.ctx.blog_repo().update(&blog).await?;
        self.invalidate(blog_id).await;

        info!("Blog updated");
        Ok(BlogResponse::from(blog))
    }

    /// Delete a post owned by `user_id`
    #[instrument(skip(self))]
    pub async fn delete_blog(&self, user_id: UserId, blog_id: BlogId) -> ServiceResult<()> {
        let blog = self.find(blog_id).await?;
        if !blog.is_author(user_id) {
            return Err(DomainError::NotBlogAuthor.into());
        }

        if !self.ctx.blog_repo().delete(blog_id).await? {
            return Err(DomainError::BlogNotFound(blog_id).into());
        }
        self.invalidate(blog_id).await;

        info!("Blog deleted");
        Ok(())
    }

    async fn find(&self, blog_id: BlogId) -> ServiceResult<Blog> {
        Ok(self
            .ctx
            .blog_repo()
            .find_by_id(blog_id)
            .await?
            .ok_or(DomainError::BlogNotFound(blog_id))?)
    }

    async fn invalidate(&self, blog_id: BlogId) {
        if let Err(e) = self.ctx.blog_cache().invalidate(blog_id).await {
            warn!(blog_id = %blog_id, error = %e, "Blog cache invalidation failed");
        }
    }
}

//! Service context - dependency container for services
//!
//! Holds all repositories, the blog cache, auth helpers and the task distributor.

use std::sync::Arc;

use blog_common::auth::{JwtService, PasswordService};
use blog_core::traits::{
    BlogCache, BlogRepository, CommentRepository, UserCommentRepository, UserRepository,
};

use crate::tasks::CommentTaskDistributor;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Everything is behind a trait object or cheap handle, so cloning the
/// context for each request is inexpensive.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    blog_repo: Arc<dyn BlogRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    user_comment_repo: Arc<dyn UserCommentRepository>,

    // Cache
    blog_cache: Arc<dyn BlogCache>,

    // Auth
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,

    // Task queue
    distributor: CommentTaskDistributor,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn blog_repo(&self) -> &dyn BlogRepository {
        self.blog_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// The reaction store
    pub fn user_comment_repo(&self) -> &dyn UserCommentRepository {
        self.user_comment_repo.as_ref()
    }

    /// Shared handle to the reaction store, for task handlers
    pub fn user_comment_repo_arc(&self) -> Arc<dyn UserCommentRepository> {
        Arc::clone(&self.user_comment_repo)
    }

    // === Cache ===

    pub fn blog_cache(&self) -> &dyn BlogCache {
        self.blog_cache.as_ref()
    }

    // === Auth ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    // === Task queue ===

    pub fn distributor(&self) -> &CommentTaskDistributor {
        &self.distributor
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("blog_cache", &"...")
            .field("distributor", &self.distributor)
            .finish_non_exhaustive()
    }
}

/// Builder for creating `ServiceContext`
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    blog_repo: Option<Arc<dyn BlogRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    user_comment_repo: Option<Arc<dyn UserCommentRepository>>,
    blog_cache: Option<Arc<dyn BlogCache>>,
    jwt_service: Option<Arc<JwtService>>,
    password_service: Option<PasswordService>,
    distributor: Option<CommentTaskDistributor>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn blog_repo(mut self, repo: Arc<dyn BlogRepository>) -> Self {
        self.blog_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn user_comment_repo(mut self, repo: Arc<dyn UserCommentRepository>) -> Self {
        self.user_comment_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn blog_cache(mut self, cache: Arc<dyn BlogCache>) -> Self {
        self.blog_cache = Some(cache);
        self
    }

    #[must_use]
    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Defaults to Argon2id with default parameters
    #[must_use]
    pub fn password_service(mut self, service: PasswordService) -> Self {
        self.password_service = Some(service);
        self
    }

    #[must_use]
    pub fn distributor(mut self, distributor: CommentTaskDistributor) -> Self {
        self.distributor = Some(distributor);
        self
    }

    /// Build the `ServiceContext`
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            blog_repo: required(self.blog_repo, "blog_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            user_comment_repo: required(self.user_comment_repo, "user_comment_repo")?,
            blog_cache: required(self.blog_cache, "blog_cache")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: self.password_service.unwrap_or_default(),
            distributor: required(self.distributor, "distributor")?,
        })
    }
}

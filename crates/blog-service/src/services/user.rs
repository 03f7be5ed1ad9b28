//! User service
//!
//! Read access to user profiles.

use blog_core::entities::User;
use blog_core::{DomainError, UserId};
use tracing::instrument;

use crate::dto::{CurrentUserResponse, UserResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new `UserService`
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get user by ID (public profile)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<UserResponse> {
        Ok(UserResponse::from(&self.get_user_entity(user_id).await?))
    }

    /// Get current authenticated user (full profile)
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: UserId) -> ServiceResult<CurrentUserResponse> {
        Ok(CurrentUserResponse::from(
            &self.get_user_entity(user_id).await?,
        ))
    }

    /// Get user entity by ID
    pub async fn get_user_entity(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }
}

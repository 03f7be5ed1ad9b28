//! Authentication service
//!
//! Handles user registration, login and token refresh.

use blog_common::auth::validate_password_strength;
use blog_common::AppError;
use blog_core::entities::User;
use blog_core::UserId;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new `AuthService`
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;
        validate_password_strength(&request.password)?;

        let email = User::normalize_email(&request.email);
        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let mut user = User::new(
            UserId::new(),
            request.first_name.trim().to_string(),
            request.last_name.trim().to_string(),
            email,
        );
        if let Some(role) = non_empty(request.role) {
            user.role = Some(role.to_lowercase());
        }
        user.about = request.about;
        user.avatar = non_empty(request.avatar);
        user.phone_number = non_empty(request.phone_number);
        user.address = request.address;
        user.city = request.city;
        user.country = request.country;
        user.gender = request.gender;
        user.postcode = request.postcode;
        user.birthday = request.birthday;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        self.issue_tokens(&user)
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: invalid password"))?;

        self.ctx.user_repo().touch_login(user.id).await?;
        user.login_date = chrono::Utc::now();

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(&user)
    }

    /// Exchange a refresh token for a new token pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        // The user may have been removed since the token was issued
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        self.issue_tokens(&user)
    }

    /// Validate an access token and return the user ID
    pub fn validate_token(&self, token: &str) -> ServiceResult<UserId> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        Ok(claims.user_id()?)
    }

    fn issue_tokens(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .issue(user.id, user.role.as_deref())?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

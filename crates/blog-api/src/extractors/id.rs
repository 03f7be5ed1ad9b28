//! Typed id path extractor

use std::str::FromStr;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use blog_core::IdParseError;

use crate::response::ApiError;

/// A single UUID path segment parsed into its typed id
///
/// ```ignore
/// async fn get_blog(IdPath(blog_id): IdPath<BlogId>) { .. }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<T> IdPath<T>
where
    T: FromStr<Err = IdParseError>,
{
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        raw.parse()
            .map(IdPath)
            .map_err(|e: IdParseError| ApiError::invalid_path(e.to_string()))
    }
}

#[async_trait]
impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr<Err = IdParseError> + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Self::parse(&raw)
    }
}

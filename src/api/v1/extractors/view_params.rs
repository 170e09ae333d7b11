/*
 * Responsibility
 * - reads the query string (?q=&tag=&sort=&featured=) as ViewParameters
 * - malformed values become AppError (400)
 * - shared by /posts and /tags/{tag}
 */
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use crate::api::v1::dto::posts::ListPostsQuery;
use crate::domain::ViewParameters;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct ViewParams(pub ViewParameters);

impl<S> FromRequestParts<S> for ViewParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ListPostsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request("INVALID_QUERY", e.body_text()))?;

        Ok(Self(query.into_view_parameters()?))
    }
}

/*
 * Responsibility
 * - GET /tags/{tag}: listing engine over the posts carrying one tag
 * - an empty result is a 404 (unknown tag)
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{dto::posts::TagListingResponse, extractors::ViewParams},
    error::AppError,
    services::listing,
    state::AppState,
};

pub async fn list_posts_by_tag(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    ViewParams(params): ViewParams,
) -> Result<Json<TagListingResponse>, AppError> {
    let posts = state.posts.fetch_posts_by_tag(&tag).await;
    if posts.is_empty() {
        return Err(AppError::not_found("tag"));
    }

    let listing = listing::list(&posts, &params);

    Ok(Json(TagListingResponse {
        tag,
        listing: listing.into(),
    }))
}

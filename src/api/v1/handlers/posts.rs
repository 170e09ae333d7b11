/*
 * Responsibility
 * - GET /posts: listing engine over every post (search / tag / sort / featured)
 * - GET /posts/{slug}: single post + related posts
 * - not-found is decided here; the service only returns None
 */
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::v1::{
        dto::posts::{ListingResponse, PostDetailResponse},
        extractors::ViewParams,
    },
    error::AppError,
    services::listing,
    state::AppState,
};

const RELATED_LIMIT: usize = 3;

pub async fn list_posts(
    State(state): State<AppState>,
    ViewParams(params): ViewParams,
) -> Result<Json<ListingResponse>, AppError> {
    let posts = state.posts.fetch_all_posts().await;
    let listing = listing::list(&posts, &params);

    tracing::debug!(
        total = listing.stats.total,
        matched = listing.filtered.len(),
        sort = %params.sort_key,
        "listed posts"
    );

    Ok(Json(listing.into()))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostDetailResponse>, AppError> {
    let post = state
        .posts
        .fetch_post_by_slug(&slug)
        .await
        .ok_or(AppError::not_found("post"))?;

    let all = state.posts.fetch_all_posts().await;
    let related = listing::related_posts(&all, &post, RELATED_LIMIT);

    Ok(Json(PostDetailResponse { post, related }))
}

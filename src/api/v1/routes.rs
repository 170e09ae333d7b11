/*
 * Responsibility
 * - URL layout of v1
 * - read-only: /posts, /posts/{slug}, /tags/{tag}
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    posts::{get_post, list_posts},
    tags::list_posts_by_tag,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{slug}", get(get_post))
        .route("/tags/{tag}", get(list_posts_by_tag))
}

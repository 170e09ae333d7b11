/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 * - cloned per request, so everything inside is an Arc
 */
use std::sync::Arc;

use crate::services::PostService;

#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
}

impl AppState {
    pub fn new(posts: Arc<PostService>) -> Self {
        Self { posts }
    }
}

//! Post lookups with the fallback policy.
//!
//! Every lookup goes to the row source once (bounded by `fetch_timeout`, no
//! retry). An error, a timeout or an empty result switches to the injected
//! fallback set, searched with the same predicate as the live query. Source
//! failures are logged and never returned to the caller.
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::Post;
use crate::repos::{PostRow, PostSource, RepoError, RepoResult, RowQuery};
use crate::services::fallback::FallbackPosts;
use crate::services::normalizer;

#[derive(Clone)]
pub struct PostService {
    source: Arc<dyn PostSource>,
    fallback: FallbackPosts,
    fetch_timeout: Duration,
}

impl PostService {
    pub fn new(
        source: Arc<dyn PostSource>,
        fallback: FallbackPosts,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            fallback,
            fetch_timeout,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.source.backend_name()
    }

    /// All posts, newest first at the source.
    pub async fn fetch_all_posts(&self) -> Vec<Post> {
        match self.fetch(&RowQuery::All).await {
            Some(rows) => normalizer::normalize_all(rows, Utc::now()),
            None => self.fallback.all(),
        }
    }

    pub async fn fetch_post_by_slug(&self, slug: &str) -> Option<Post> {
        if slug.is_empty() {
            return None;
        }

        match self.fetch(&RowQuery::BySlug(slug.to_string())).await {
            Some(rows) => rows
                .into_iter()
                .next()
                .map(|row| normalizer::normalize(row, Utc::now())),
            None => self.fallback.by_slug(slug),
        }
    }

    pub async fn fetch_posts_by_tag(&self, tag: &str) -> Vec<Post> {
        if tag.is_empty() {
            return Vec::new();
        }

        match self.fetch(&RowQuery::ByTag(tag.to_string())).await {
            Some(rows) => normalizer::normalize_all(rows, Utc::now()),
            None => self.fallback.by_tag(tag),
        }
    }

    /// `Some(rows)` only for a successful, non-empty fetch.
    async fn fetch(&self, query: &RowQuery) -> Option<Vec<PostRow>> {
        match self.fetch_with_timeout(query).await {
            Ok(rows) if rows.is_empty() => {
                tracing::debug!(
                    backend = self.source.backend_name(),
                    ?query,
                    "row source returned no rows, serving fallback posts"
                );
                None
            }
            Ok(rows) => {
                tracing::debug!(
                    backend = self.source.backend_name(),
                    ?query,
                    rows = rows.len(),
                    "fetched rows"
                );
                Some(rows)
            }
            Err(e) => {
                tracing::warn!(
                    backend = self.source.backend_name(),
                    ?query,
                    error = %e,
                    "row source failed, serving fallback posts"
                );
                None
            }
        }
    }

    async fn fetch_with_timeout(&self, query: &RowQuery) -> RepoResult<Vec<PostRow>> {
        tokio::time::timeout(self.fetch_timeout, self.source.fetch_rows(query))
            .await
            .map_err(|_| RepoError::Timeout(self.fetch_timeout))?
    }
}

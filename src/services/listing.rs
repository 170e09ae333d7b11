//! Listing engine: filter, sort and aggregate a post collection for one view.
//!
//! Pure and synchronous. The input slice is never reordered; every call
//! builds its output from scratch.
use std::collections::HashSet;

use serde::Serialize;

use crate::domain::view::ALL_TAGS;
use crate::domain::{Post, SortKey, ViewParameters};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub featured: usize,
    pub total_views: u64,
    /// Mean reading minutes rounded to one decimal, `0.0` for no posts.
    pub avg_read: f64,
}

impl Stats {
    pub fn of(posts: &[Post]) -> Self {
        let total = posts.len();
        let featured = posts.iter().filter(|p| p.featured).count();
        let total_views = posts.iter().map(|p| p.views).sum();
        let avg_read = if total == 0 {
            0.0
        } else {
            let minutes: u64 = posts.iter().map(|p| u64::from(p.reading_minutes)).sum();
            round_one_decimal(minutes as f64 / total as f64)
        };

        Self {
            total,
            featured,
            total_views,
            avg_read,
        }
    }

    /// Display form: one decimal (`"7.0"`), or `"0"` for an empty collection.
    pub fn avg_read_label(&self) -> String {
        if self.total == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.avg_read)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub filtered: Vec<Post>,
    pub stats: Stats,
    pub available_tags: Vec<String>,
}

pub fn list(posts: &[Post], params: &ViewParameters) -> Listing {
    Listing {
        filtered: filter_and_sort(posts, params),
        stats: Stats::of(posts),
        available_tags: available_tags(posts),
    }
}

/// Text, then tag, then featured; the survivors are sorted by `params.sort_key`.
pub fn filter_and_sort(posts: &[Post], params: &ViewParameters) -> Vec<Post> {
    let query = params.query.to_lowercase();

    let by_query = posts.iter().filter(|post| matches_query(post, &query));
    let by_tag = by_query.filter(|post| params.tag_filter.matches(&post.tags));
    let by_featured = by_tag.filter(|post| !params.featured_only || post.featured);

    let mut out: Vec<Post> = by_featured.cloned().collect();
    sort_posts(&mut out, params.sort_key);
    out
}

/// Stable: posts with equal keys keep their relative order.
pub fn sort_posts(posts: &mut [Post], sort_key: SortKey) {
    match sort_key {
        SortKey::Newest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => posts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Popular => posts.sort_by(|a, b| b.views.cmp(&a.views)),
        SortKey::Reading => posts.sort_by_key(|p| p.reading_minutes),
    }
}

/// `"all"` followed by every distinct tag in first-seen order.
pub fn available_tags(posts: &[Post]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = vec![ALL_TAGS.to_string()];
    for tag in posts.iter().flat_map(|p| p.tags.iter()) {
        if seen.insert(tag.as_str()) {
            out.push(tag.clone());
        }
    }
    out
}

/// Up to `limit` other posts sharing at least one tag with `post`, in `all` order.
pub fn related_posts(all: &[Post], post: &Post, limit: usize) -> Vec<Post> {
    all.iter()
        .filter(|other| other.slug != post.slug)
        .filter(|other| other.tags.iter().any(|tag| post.has_tag(tag)))
        .take(limit)
        .cloned()
        .collect()
}

fn matches_query(post: &Post, query_lower: &str) -> bool {
    if query_lower.is_empty() {
        return true;
    }
    let haystack = format!("{} {} {}", post.title, post.excerpt, post.tags.join(" "));
    haystack.to_lowercase().contains(query_lower)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

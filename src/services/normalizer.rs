//! Row -> canonical `Post` conversion.
//!
//! `normalize` is total: any row carrying `id`, `title` and `slug` produces a
//! fully populated `Post`. Each optional column is defaulted on its own, so a
//! partially filled row never invalidates the others.
use chrono::{DateTime, Utc};

use crate::domain::post::{DEFAULT_AUTHOR, DEFAULT_EXCERPT, DEFAULT_READING_MINUTES, Post};
use crate::repos::{PostRow, RawTags};

/// Normalize a source tag value into the canonical ordered sequence.
///
/// - absent -> `[]`
/// - list -> unchanged, minus null elements
/// - `"a, b,c"` -> `["a", "b", "c"]` (empty pieces dropped)
/// - `"solo"` -> `["solo"]`
pub fn normalize_tags(value: Option<RawTags>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(RawTags::List(tags)) => tags.into_iter().flatten().collect(),
        Some(RawTags::Delimited(raw)) => raw
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// `now` stamps rows without `created_at`; callers pass one instant per fetch.
pub fn normalize(row: PostRow, now: DateTime<Utc>) -> Post {
    let created_at = row.created_at.unwrap_or(now);
    let updated_at = row.updated_at.unwrap_or(created_at);

    Post {
        id: row.id,
        title: row.title,
        slug: row.slug,
        excerpt: non_blank(row.excerpt).unwrap_or_else(|| DEFAULT_EXCERPT.to_string()),
        cover_url: non_blank(row.cover_url),
        tags: normalize_tags(row.tags.map(|json| json.0)),
        created_at,
        updated_at,
        featured: row.featured.unwrap_or(false),
        reading_minutes: row
            .reading_minutes
            .and_then(|m| u32::try_from(m).ok())
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_READING_MINUTES),
        author: non_blank(row.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        views: row
            .views
            .and_then(|v| u64::try_from(v).ok())
            .unwrap_or(0),
    }
}

pub fn normalize_all(rows: Vec<PostRow>, now: DateTime<Utc>) -> Vec<Post> {
    rows.into_iter().map(|row| normalize(row, now)).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/*
 * Responsibility
 * - canonical Post (normalizer output, listing engine input)
 * - every field is populated; optional source data never reaches this type
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_EXCERPT: &str = "No summary provided.";
pub const DEFAULT_AUTHOR: &str = "Unknown author";
pub const DEFAULT_READING_MINUTES: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub featured: bool,
    pub reading_minutes: u32,
    pub author: String,
    pub views: u64,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive tag membership, used by the fallback lookup path.
    pub fn has_tag_ignore_case(&self, tag: &str) -> bool {
        let needle = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == needle)
    }
}

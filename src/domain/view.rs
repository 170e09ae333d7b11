/*
 * Responsibility
 * - ViewParameters: one listing request (query / tag / sort / featured-only)
 * - string forms of SortKey / TagFilter (query string <-> enum)
 */
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

pub const ALL_TAGS: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Popular,
    Reading,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Popular => "popular",
            SortKey::Reading => "reading",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl fmt::Display for UnknownSortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown sort key `{}` (expected newest, oldest, popular or reading)",
            self.0
        )
    }
}

impl std::error::Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "popular" => Ok(SortKey::Popular),
            "reading" => Ok(SortKey::Reading),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    #[default]
    All,
    Tag(String),
}

impl TagFilter {
    pub fn matches(&self, tags: &[String]) -> bool {
        match self {
            TagFilter::All => true,
            TagFilter::Tag(tag) => tags.iter().any(|t| t == tag),
        }
    }
}

impl From<&str> for TagFilter {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == ALL_TAGS {
            TagFilter::All
        } else {
            TagFilter::Tag(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParameters {
    pub query: String,
    pub tag_filter: TagFilter,
    pub sort_key: SortKey,
    pub featured_only: bool,
}

#[cfg(test)]
impl ViewParameters {
    pub fn sorted_by(sort_key: SortKey) -> Self {
        Self {
            sort_key,
            ..Self::default()
        }
    }
}

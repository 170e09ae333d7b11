/*
 * Responsibility
 * - query / response DTOs for /posts and /tags
 * - query string -> ViewParameters, validated (unknown sort -> 400)
 */
use serde::{Deserialize, Serialize};

use crate::domain::view::UnknownSortKey;
use crate::domain::{Post, SortKey, TagFilter, ViewParameters};
use crate::services::listing::{Listing, Stats};

#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub q: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub featured: Option<bool>,
}

impl ListPostsQuery {
    pub fn into_view_parameters(self) -> Result<ViewParameters, UnknownSortKey> {
        let sort_key = match self.sort.as_deref() {
            None | Some("") => SortKey::default(),
            Some(raw) => raw.parse()?,
        };

        Ok(ViewParameters {
            query: self.q.unwrap_or_default(),
            tag_filter: self
                .tag
                .as_deref()
                .map(TagFilter::from)
                .unwrap_or_default(),
            sort_key,
            featured_only: self.featured.unwrap_or(false),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: usize,
    pub featured: usize,
    pub total_views: u64,
    pub avg_read: String,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total: stats.total,
            featured: stats.featured,
            total_views: stats.total_views,
            avg_read: stats.avg_read_label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    pub posts: Vec<Post>,
    pub stats: StatsResponse,
    pub tags: Vec<String>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            posts: listing.filtered,
            stats: listing.stats.into(),
            tags: listing.available_tags,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagListingResponse {
    pub tag: String,
    #[serde(flatten)]
    pub listing: ListingResponse,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub related: Vec<Post>,
}

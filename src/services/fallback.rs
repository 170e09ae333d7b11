/*
 * Responsibility
 * - static sample posts served when the row source fails or returns nothing
 * - held as an explicit value (FallbackPosts) and injected into PostService
 */
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::Post;

#[derive(Clone, Debug)]
pub struct FallbackPosts {
    posts: Arc<[Post]>,
}

impl FallbackPosts {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into(),
        }
    }

    /// The built-in sample set: three posts with distinct tags, two featured.
    pub fn sample() -> Self {
        Self::new(sample_posts())
    }

    pub fn all(&self) -> Vec<Post> {
        self.posts.to_vec()
    }

    pub fn by_slug(&self, slug: &str) -> Option<Post> {
        self.posts.iter().find(|post| post.slug == slug).cloned()
    }

    /// Case-insensitive. Only the fallback path ignores case; the live
    /// `tags @> ARRAY[$1]` query matches the tag exactly.
    pub fn by_tag(&self, tag: &str) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|post| post.has_tag_ignore_case(tag))
            .cloned()
            .collect()
    }
}

impl Default for FallbackPosts {
    fn default() -> Self {
        Self::sample()
    }
}

fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .unwrap_or_default()
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            id: "1".into(),
            title: "Building a modern blog with Next.js 14 and Supabase".into(),
            slug: "modern-blog-nextjs-supabase".into(),
            excerpt: "A deep dive into creating a performant, secure, and delightful reading \
                      experience with the latest Next.js App Router and Supabase features."
                .into(),
            cover_url: Some(
                "https://images.unsplash.com/photo-1524995997946-a1c2e315a42f?auto=format&fit=crop&w=1200&q=80"
                    .into(),
            ),
            tags: tags(&["nextjs", "supabase", "fullstack"]),
            created_at: at(2024, 4, 12, 10),
            updated_at: at(2024, 4, 14, 12),
            featured: true,
            reading_minutes: 8,
            author: "Avery Kim".into(),
            views: 12_800,
        },
        Post {
            id: "2".into(),
            title: "Designing for readability: a practical guide".into(),
            slug: "designing-for-readability".into(),
            excerpt: "Typography, spacing, and contrast: learn how to craft interfaces that \
                      feel effortless to read on any device."
                .into(),
            cover_url: Some(
                "https://images.unsplash.com/photo-1460925895917-afdab827c52f?auto=format&fit=crop&w=1200&q=80"
                    .into(),
            ),
            tags: tags(&["design", "ux", "accessibility"]),
            created_at: at(2024, 3, 2, 9),
            updated_at: at(2024, 3, 5, 9),
            featured: false,
            reading_minutes: 6,
            author: "Jordan Lee".into(),
            views: 9_300,
        },
        Post {
            id: "3".into(),
            title: "Edge rendering patterns for SEO and performance".into(),
            slug: "edge-rendering-patterns".into(),
            excerpt: "Learn when to render at the edge, cache smartly, and keep your \
                      Lighthouse scores high without sacrificing dynamic content."
                .into(),
            cover_url: Some(
                "https://images.unsplash.com/photo-1498050108023-c5249f4df085?auto=format&fit=crop&w=1200&q=80"
                    .into(),
            ),
            tags: tags(&["performance", "seo", "edge"]),
            created_at: at(2024, 2, 10, 12),
            updated_at: at(2024, 2, 11, 12),
            featured: true,
            reading_minutes: 7,
            author: "Riley Chen".into(),
            views: 15_100,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_covers_featured_and_plain_posts() {
        let posts = FallbackPosts::sample().all();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts.iter().filter(|p| p.featured).count(), 2);

        let mut created: Vec<_> = posts.iter().map(|p| p.created_at).collect();
        created.dedup();
        assert_eq!(created.len(), 3);
    }

    #[test]
    fn slug_lookup_is_exact() {
        let fallback = FallbackPosts::sample();
        assert_eq!(
            fallback.by_slug("edge-rendering-patterns").map(|p| p.id),
            Some("3".to_string())
        );
        assert!(fallback.by_slug("Edge-Rendering-Patterns").is_none());
        assert!(fallback.by_slug("missing").is_none());
    }

    #[test]
    fn tag_lookup_ignores_case() {
        let fallback = FallbackPosts::sample();
        let hits = fallback.by_tag("NextJS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "modern-blog-nextjs-supabase");
        assert!(fallback.by_tag("rust").is_empty());
    }
}

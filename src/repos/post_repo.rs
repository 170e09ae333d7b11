/*
 * Responsibility
 * - the capability to read rows of the posts table (PostSource)
 * - PgPostSource: hosted Postgres via sqlx; UnavailableSource when no DB is configured
 * - rows are returned raw; defaults are applied by services::normalizer
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{PgPool, types::Json};

use crate::repos::error::{RepoError, RepoResult};

/// Tag column as stored at the source: either a real array or a
/// comma-delimited string. Never leaves the repo/normalizer boundary.
///
/// A Postgres `text[]` may hold NULL elements, which `to_jsonb` renders as
/// JSON `null`; they decode as `None` and are dropped by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    List(Vec<Option<String>>),
    Delimited(String),
}

#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct PostRow {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub cover_url: Option<String>,
    // selected as `to_jsonb(tags)` so both text[] and text columns decode
    pub tags: Option<Json<RawTags>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub featured: Option<bool>,
    pub reading_minutes: Option<i64>,
    pub author: Option<String>,
    pub views: Option<i64>,
}

/// Predicate understood by every row source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowQuery {
    /// Every row, newest first.
    All,
    /// At most one row whose slug equals the value.
    BySlug(String),
    /// Rows whose tag array contains the value, newest first.
    ByTag(String),
}

/// The external row-fetching capability.
///
/// Implementations must be cheap to share (`Arc<dyn PostSource>` in AppState).
#[async_trait]
pub trait PostSource: Send + Sync {
    // Backend name for logging.
    fn backend_name(&self) -> &'static str;

    async fn fetch_rows(&self, query: &RowQuery) -> RepoResult<Vec<PostRow>>;
}

const COLUMNS: &str = r#"
    id::text AS id,
    title,
    slug,
    excerpt,
    cover_url,
    to_jsonb(tags) AS tags,
    created_at,
    updated_at,
    featured,
    reading_minutes::int8 AS reading_minutes,
    author,
    views::int8 AS views
"#;

#[derive(Clone, Debug)]
pub struct PgPostSource {
    pool: PgPool,
    select_all: String,
    select_by_slug: String,
    select_by_tag: String,
}

impl PgPostSource {
    /// `table` must already be validated as a plain SQL identifier (see `config`).
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            select_all: format!(
                "SELECT {COLUMNS} FROM {table} ORDER BY created_at DESC NULLS LAST"
            ),
            select_by_slug: format!("SELECT {COLUMNS} FROM {table} WHERE slug = $1 LIMIT 1"),
            select_by_tag: format!(
                "SELECT {COLUMNS} FROM {table} WHERE tags @> ARRAY[$1]::text[] \
                 ORDER BY created_at DESC NULLS LAST"
            ),
        }
    }
}

#[async_trait]
impl PostSource for PgPostSource {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn fetch_rows(&self, query: &RowQuery) -> RepoResult<Vec<PostRow>> {
        let rows = match query {
            RowQuery::All => {
                sqlx::query_as::<_, PostRow>(&self.select_all)
                    .fetch_all(&self.pool)
                    .await?
            }
            RowQuery::BySlug(slug) => sqlx::query_as::<_, PostRow>(&self.select_by_slug)
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?
                .into_iter()
                .collect(),
            RowQuery::ByTag(tag) => {
                sqlx::query_as::<_, PostRow>(&self.select_by_tag)
                    .bind(tag)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows)
    }
}

/// Row source used when no database is configured: every fetch fails, so
/// callers always end up on the fallback dataset.
#[derive(Clone, Debug, Default)]
pub struct UnavailableSource;

#[async_trait]
impl PostSource for UnavailableSource {
    fn backend_name(&self) -> &'static str {
        "unavailable"
    }

    async fn fetch_rows(&self, _query: &RowQuery) -> RepoResult<Vec<PostRow>> {
        Err(RepoError::Unavailable("DATABASE_URL is not configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_tags_decode_from_array_or_string() {
        let list: RawTags = serde_json::from_str(r#"["a","b"]"#).unwrap();
        assert_eq!(list, RawTags::List(vec![Some("a".into()), Some("b".into())]));

        let delimited: RawTags = serde_json::from_str(r#""a, b""#).unwrap();
        assert_eq!(delimited, RawTags::Delimited("a, b".into()));
    }

    #[test]
    fn array_with_null_elements_still_decodes() {
        let tags: RawTags = serde_json::from_str(r#"["rust", null]"#).unwrap();
        assert_eq!(tags, RawTags::List(vec![Some("rust".into()), None]));

        let row: Json<RawTags> = serde_json::from_str(r#"[null]"#).unwrap();
        assert_eq!(row.0, RawTags::List(vec![None]));
    }

    #[tokio::test]
    async fn queries_target_the_configured_table() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/blog")
            .unwrap();
        let source = PgPostSource::new(pool, "articles");

        assert!(source.select_all.contains("FROM articles ORDER BY created_at DESC"));
        assert!(source.select_by_slug.contains("WHERE slug = $1 LIMIT 1"));
        assert!(source.select_by_tag.contains("tags @> ARRAY[$1]::text[]"));
    }

    #[tokio::test]
    async fn unavailable_source_always_fails() {
        let err = UnavailableSource.fetch_rows(&RowQuery::All).await.unwrap_err();
        assert!(matches!(err, RepoError::Unavailable(_)));
    }
}

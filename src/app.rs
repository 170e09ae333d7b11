/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config -> row source / PostService -> Router
 * - middleware (HTTP layers / CORS)
 * - start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::{Router, routing::get};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::{PgPostSource, PostSource, UnavailableSource},
    services::{FallbackPosts, PostService},
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,personal_blog=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so the panic is noticed
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting blog API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(config: &Config) -> Result<AppState> {
    let source: Arc<dyn PostSource> = match &config.database_url {
        Some(url) => {
            // lazy: an unreachable database must not stop startup, lookups fall back instead
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(config.fetch_timeout)
                .connect_lazy(url)?;
            tracing::info!(table = %config.posts_table, "reading posts from postgres");
            Arc::new(PgPostSource::new(pool, &config.posts_table))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; serving the built-in fallback posts");
            Arc::new(UnavailableSource)
        }
    };

    let posts = PostService::new(source, FallbackPosts::sample(), config.fetch_timeout);
    Ok(AppState::new(Arc::new(posts)))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(api::v1::handlers::health::health))
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::http::apply(router, config.request_timeout);
    middleware::cors::apply(router, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::AppEnv;
    use crate::repos::{PostRow, RepoResult, RowQuery};

    fn test_config() -> Config {
        Config {
            addr: "127.0.0.1:0".parse().unwrap(),
            app_env: AppEnv::Development,
            database_url: None,
            posts_table: "posts".into(),
            db_max_connections: 1,
            fetch_timeout: Duration::from_millis(100),
            request_timeout: Duration::from_secs(5),
            cors_allowed_origins: Vec::new(),
        }
    }

    fn app_with(source: Arc<dyn PostSource>) -> Router {
        let config = test_config();
        let posts = PostService::new(source, FallbackPosts::sample(), config.fetch_timeout);
        build_router(AppState::new(Arc::new(posts)), &config)
    }

    fn offline_app() -> Router {
        app_with(Arc::new(UnavailableSource))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let res = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn slugs(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn health_reports_the_row_source() {
        let (status, body) = get_json(offline_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["source"], "unavailable");
    }

    #[tokio::test]
    async fn listing_serves_fallback_posts_with_stats() {
        let (status, body) = get_json(offline_app(), "/api/v1/posts?sort=popular").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            slugs(&body["posts"]),
            vec![
                "edge-rendering-patterns",
                "modern-blog-nextjs-supabase",
                "designing-for-readability",
            ]
        );
        assert_eq!(body["stats"]["total"], 3);
        assert_eq!(body["stats"]["featured"], 2);
        assert_eq!(body["stats"]["totalViews"], 37_200);
        assert_eq!(body["stats"]["avgRead"], "7.0");
        assert_eq!(body["tags"][0], "all");
        assert_eq!(body["posts"][0]["readingMinutes"], 7);
        assert_eq!(body["posts"][0]["createdAt"], "2024-02-10T12:00:00Z");
    }

    #[tokio::test]
    async fn listing_applies_query_and_featured_filters() {
        let (_, body) = get_json(offline_app(), "/api/v1/posts?featured=true").await;
        assert_eq!(
            slugs(&body["posts"]),
            vec!["modern-blog-nextjs-supabase", "edge-rendering-patterns"]
        );

        let (_, body) = get_json(offline_app(), "/api/v1/posts?q=typography").await;
        assert_eq!(slugs(&body["posts"]), vec!["designing-for-readability"]);

        let (_, body) = get_json(offline_app(), "/api/v1/posts?tag=UX").await;
        assert!(slugs(&body["posts"]).is_empty());
        assert_eq!(body["stats"]["total"], 3);
    }

    #[tokio::test]
    async fn unknown_sort_is_a_bad_request() {
        let (status, body) = get_json(offline_app(), "/api/v1/posts?sort=random").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_SORT");
    }

    #[tokio::test]
    async fn malformed_featured_flag_is_a_bad_request() {
        let (status, body) = get_json(offline_app(), "/api/v1/posts?featured=maybe").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn post_detail_includes_related_posts() {
        let (status, body) =
            get_json(offline_app(), "/api/v1/posts/modern-blog-nextjs-supabase").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["post"]["author"], "Avery Kim");
        assert_eq!(body["post"]["featured"], true);
        // the sample posts share no tags
        assert!(slugs(&body["related"]).is_empty());
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let (status, body) = get_json(offline_app(), "/api/v1/posts/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn tag_view_falls_back_case_insensitively() {
        let (status, body) = get_json(offline_app(), "/api/v1/tags/SEO").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tag"], "SEO");
        assert_eq!(slugs(&body["posts"]), vec!["edge-rendering-patterns"]);
        assert_eq!(body["stats"]["total"], 1);
    }

    #[tokio::test]
    async fn unknown_tag_is_not_found() {
        let (status, _) = get_json(offline_app(), "/api/v1/tags/cooking").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    struct LiveSource;

    #[async_trait]
    impl PostSource for LiveSource {
        fn backend_name(&self) -> &'static str {
            "live"
        }

        async fn fetch_rows(&self, query: &RowQuery) -> RepoResult<Vec<PostRow>> {
            let row = |id: &str, slug: &str| PostRow {
                id: id.into(),
                title: format!("Post {id}"),
                slug: slug.into(),
                tags: Some(sqlx::types::Json(crate::repos::RawTags::Delimited(
                    "rust, axum".into(),
                ))),
                ..PostRow::default()
            };
            let rows = vec![row("a", "first"), row("b", "second")];

            Ok(match query {
                RowQuery::All | RowQuery::ByTag(_) => rows,
                RowQuery::BySlug(slug) => rows.into_iter().filter(|r| &r.slug == slug).collect(),
            })
        }
    }

    #[tokio::test]
    async fn live_rows_flow_through_normalizer_and_related_posts() {
        let (status, body) = get_json(app_with(Arc::new(LiveSource)), "/api/v1/posts/first").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["post"]["excerpt"], "No summary provided.");
        assert_eq!(body["post"]["tags"], serde_json::json!(["rust", "axum"]));
        assert!(body["post"].get("coverUrl").is_none());
        assert_eq!(slugs(&body["related"]), vec!["second"]);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let res = offline_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(res.headers().contains_key("x-request-id"));
        assert_eq!(res.headers()["x-content-type-options"], "nosniff");
    }
}

//! Axum router configuration

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{cache_dump, health_check, playlist, version_check};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS, Method::HEAD])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .max_age(Duration::from_secs(3600));

    Router::new()
        // Health and version endpoints
        .route("/health", get(health_check))
        .route("/version", get(version_check))
        // Cache introspection
        .route("/cache", get(cache_dump))
        // Playlist relay; the handler strips the .m3u8 suffix
        .route("/{file}", get(playlist))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // State
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let state = Arc::new(AppState::new(ServerConfig::default()).unwrap());
        create_router(state)
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cache_empty() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"{}");
    }

    async fn spawn_upstream(token_body: serde_json::Value) -> String {
        use axum::routing::post;
        use axum::Json;

        let app = Router::new()
            .route(
                "/gql",
                post(move || {
                    let body = token_body.clone();
                    async move { Json(body) }
                }),
            )
            .route(
                "/api/channel/hls/{file}",
                get(|| async { "#EXTM3U\n#EXT-X-VERSION:3\n" }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        base
    }

    fn app_for(base: &str) -> Router {
        let mut config = ServerConfig::default();
        config.upstream.gql_url = format!("{}/gql", base);
        config.upstream.usher_base = base.to_string();
        config.upstream.timeout_secs = 5;
        create_router(Arc::new(AppState::new(config).unwrap()))
    }

    #[tokio::test]
    async fn test_playlist_relayed() {
        let base = spawn_upstream(serde_json::json!({
            "data": { "streamPlaybackAccessToken": { "value": "t1", "signature": "s1" } }
        }))
        .await;

        let response = app_for(&base)
            .oneshot(
                Request::builder()
                    .uri("/foo.m3u8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/vnd.apple.mpegurl"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"#EXTM3U\n#EXT-X-VERSION:3\n");
    }

    #[tokio::test]
    async fn test_failed_exchange_is_bad_login() {
        let base = spawn_upstream(serde_json::json!({
            "errors": [{ "message": "service error" }]
        }))
        .await;

        let response = app_for(&base)
            .oneshot(
                Request::builder()
                    .uri("/foo.m3u8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"bad login");
    }

    #[tokio::test]
    async fn test_non_m3u8_path_is_404() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/favicon.ico")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

//! HTTP API server implementation

use crate::api::routes;
use crate::app::AppState;
use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, http::Method, Router};
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

/// HTTP API server
pub struct ApiServer {
    app: Router,
    addr: SocketAddr,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(state: Arc<AppState>) -> Result<Self> {
        let addr: SocketAddr = state
            .config
            .server
            .bind_address()
            .parse()
            .context("Invalid server host/port configuration")?;

        let app = build_router(state);

        info!("API server configured for {}", addr);

        Ok(Self { app, addr })
    }

    /// Run the API server until `shutdown` resolves, then drain in-flight requests
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(self.addr)
            .await
            .context("Failed to bind to server address")?;

        info!("API server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.app.clone())
            .with_graceful_shutdown(shutdown)
            .await
            .context("API server error")?;

        info!("API server shutdown complete");
        Ok(())
    }
}

/// Assemble the routes, optional docs mount and middleware stack
pub fn build_router(state: Arc<AppState>) -> Router {
    let config = &state.config;

    let mut app = Router::new().merge(routes::create_routes());

    if config.docs.enabled {
        info!(
            prefix = %config.docs.path_prefix,
            directory = %config.docs.directory,
            "Serving API documentation assets"
        );
        app = app.nest_service(&config.docs.path_prefix, ServeDir::new(&config.docs.directory));
    }

    let mut app = app
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )));

    if config.server.cors_enabled {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers(Any),
        );
    }

    app.with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use config::Config;
    use tower::util::ServiceExt;

    #[test]
    fn test_rejects_unparseable_bind_address() {
        let mut config = Config::default();
        config.server.host = "not a host".to_string();

        let result = ApiServer::new(Arc::new(AppState::new(config)));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_run_returns_once_shutdown_signal_fires() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        let mut server = ApiServer::new(Arc::new(AppState::new(config))).unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            server
                .run(async move {
                    let _ = rx.await;
                })
                .await
        });

        tx.send(()).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server stops after the shutdown signal")
            .unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_body_limit_applies_to_create() {
        let mut config = Config::default();
        config.server.max_body_size = 64;
        let app = build_router(Arc::new(AppState::new(config)));

        let oversized = format!(r#"{{"id":"1","first_name":"{}"}}"#, "a".repeat(256));
        let request = Request::builder()
            .method("POST")
            .uri("/accounts")
            .body(Body::from(oversized))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = build_router(Arc::new(AppState::new(Config::default())));

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/accounts")
            .header("origin", "http://example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_docs_are_served_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>docs</html>").unwrap();

        let mut config = Config::default();
        config.docs.enabled = true;
        config.docs.directory = dir.path().to_string_lossy().into_owned();
        let app = build_router(Arc::new(AppState::new(config)));

        let request = Request::builder()
            .uri("/swagger/index.html")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"<html>docs</html>");
    }

    #[tokio::test]
    async fn test_docs_are_not_served_by_default() {
        let app = build_router(Arc::new(AppState::new(Config::default())));

        let request = Request::builder()
            .uri("/swagger/index.html")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

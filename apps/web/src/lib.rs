//! # OrderDesk Web
//!
//! HTTP server for browsing products and placing orders.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         OrderDesk Web Routes                            │
//! │                                                                         │
//! │  GET  /, /index.html ──► index ──────────► db.products().list_products │
//! │  POST /order ──────────► submit_order ───► parse_order_form            │
//! │                                │              │                         │
//! │                                │              ▼                         │
//! │                                │          db.orders().submit            │
//! │                                ▼                                        │
//! │                         result page (always 200)                       │
//! │                                                                         │
//! │  anything else ────────► static/ (ServeDir) ──► not found: redirect /  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//! 1. Create the pool from [`AppConfig`]
//! 2. Ping the database; refuse to start when it is unreachable
//! 3. Bind the listen port and serve until Ctrl+C / SIGTERM
//! 4. Close the pool
//!
//! ## Configuration
//! Environment variables (see [`config::AppConfig::from_lookup`]):
//! - `APP_PORT` - HTTP port (default: 3000)
//! - `MYSQL_SERVER`, `MYSQL_SERVER_PORT`, `MYSQL_USERNAME`, `MYSQL_PASSWORD`,
//!   `MYSQL_SCHEMA`, `MYSQL_CONN_LIMIT` - database connection and pool size
//! - `DATABASE_URL` - full connection URL, overrides the `MYSQL_*` settings
//! - `STATIC_DIR` - static asset directory

pub mod config;
pub mod error;
pub mod handlers;
pub mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    handler::HandlerWithoutStateExt,
    routing::{get, post},
    Router,
};
use orderdesk_db::Database;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

// Re-exports
pub use config::{AppConfig, ConfigError};
pub use error::AppError;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub static_dir: PathBuf,
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(handlers::redirect_home.into_service());

    Router::new()
        .route("/", get(handlers::index))
        .route("/index.html", get(handlers::index))
        .route("/order", post(handlers::submit_order))
        .fallback_service(static_files)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Connects to the database, checks it is reachable, and serves until a
/// shutdown signal arrives.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::new(config.database.clone())
        .await
        .context("Failed to start server - unable to connect to database")?;

    info!("Pinging database...");
    db.ping()
        .await
        .context("Failed to start server - unable to ping database")?;
    info!("Pinged database successfully");

    let state = Arc::new(AppState {
        db: db.clone(),
        static_dir: config.static_dir.clone(),
    });
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.app_port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Application started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}

// =============================================================================
// Router Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use orderdesk_core::{OrderId, OrderLine, INVALID_CUSTOMER_MESSAGE};
    use orderdesk_db::{schema, DbConfig};
    use tower::ServiceExt;

    async fn test_state() -> Arc<AppState> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        schema::install_dev_schema(db.pool()).await.unwrap();
        schema::seed_sample_data(db.pool()).await.unwrap();

        Arc::new(AppState {
            db,
            static_dir: PathBuf::from(config::DEFAULT_STATIC_DIR),
        })
    }

    async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
        router(Arc::clone(state)).oneshot(request).await.unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn order_request(form: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/order")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn order_id_in(html: &str) -> OrderId {
        let start = html.find("#").unwrap() + 1;
        let digits: String = html[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
        OrderId::new(digits.parse().unwrap())
    }

    #[tokio::test]
    async fn test_index_lists_products() {
        let state = test_state().await;

        for uri in ["/", "/index.html"] {
            let response = send(&state, get_request(uri)).await;
            assert_eq!(response.status(), StatusCode::OK);

            let html = body_text(response).await;
            assert!(html.contains("Trek 820 - 2016"));
            assert!(html.contains("379.99"));
            assert!(html.contains("name=\"qty8\""));
        }
    }

    #[tokio::test]
    async fn test_order_success_records_rows() {
        let state = test_state().await;

        let response = send(
            &state,
            order_request("custId=7&product=3&product=5&qty3=2&qty5=1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("data-has-error=\"false\""));

        let placed = state.db.orders().find(order_id_in(&html)).await.unwrap().unwrap();
        assert_eq!(placed.order.customer_id.get(), 7);
        assert_eq!(
            placed.lines(),
            vec![OrderLine::new(3, 2), OrderLine::new(5, 1)]
        );
        assert_eq!(state.db.pool().outstanding(), 0);
    }

    #[tokio::test]
    async fn test_order_unknown_customer_renders_error_with_200() {
        let state = test_state().await;

        let response = send(&state, order_request("custId=999&product=3&qty3=2")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("data-has-error=\"true\""));
        assert!(html.contains(INVALID_CUSTOMER_MESSAGE));
        assert!(html.contains("999"));
    }

    #[tokio::test]
    async fn test_order_malformed_customer_is_invalid_customer() {
        let state = test_state().await;

        let response = send(&state, order_request("custId=abc&product=3&qty3=2")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(INVALID_CUSTOMER_MESSAGE));
    }

    #[tokio::test]
    async fn test_order_without_products_is_accepted() {
        let state = test_state().await;

        let response = send(&state, order_request("custId=7")).await;
        let html = body_text(response).await;
        assert!(html.contains("data-has-error=\"false\""));

        let placed = state.db.orders().find(order_id_in(&html)).await.unwrap().unwrap();
        assert!(placed.details.is_empty());
    }

    #[tokio::test]
    async fn test_order_insert_failure_hides_driver_text() {
        let state = test_state().await;

        let response = send(
            &state,
            order_request("custId=7&product=3&product=3&qty3=2"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("data-has-error=\"true\""));
        assert!(html.contains("Failed to insert new order: order line 2 (product 3)"));
        assert!(!html.contains("UNIQUE"));
        assert!(!html.contains(INVALID_CUSTOMER_MESSAGE));

        // The header insert succeeded before line 2 failed, then rolled back.
        assert!(state.db.orders().find(OrderId::new(1)).await.unwrap().is_none());
        assert_eq!(state.db.pool().outstanding(), 0);
    }

    #[tokio::test]
    async fn test_order_with_extreme_quantity_while_logging() {
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::fmt().with_test_writer().finish(),
        );
        let state = test_state().await;

        let response = send(
            &state,
            order_request("custId=7&product=3&product=5&qty3=9223372036854775807&qty5=1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("data-has-error=\"false\""));

        let placed = state.db.orders().find(order_id_in(&html)).await.unwrap().unwrap();
        assert_eq!(
            placed.lines(),
            vec![OrderLine::new(3, i64::MAX), OrderLine::new(5, 1)]
        );
    }

    #[tokio::test]
    async fn test_pool_balanced_across_requests() {
        let state = test_state().await;

        let response = send(&state, order_request("custId=7&product=3&qty3=2")).await;
        assert!(body_text(response).await.contains("data-has-error=\"false\""));
        assert_eq!(state.db.pool().outstanding(), 0);

        let response = send(
            &state,
            order_request("custId=7&product=3&product=3&qty3=2"),
        )
        .await;
        assert!(body_text(response).await.contains("data-has-error=\"true\""));
        assert_eq!(state.db.pool().outstanding(), 0);

        let response = send(&state, get_request("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.db.pool().outstanding(), 0);
    }

    #[tokio::test]
    async fn test_unknown_paths_redirect_home() {
        let state = test_state().await;

        let response = send(&state, get_request("/no/such/page")).await;
        assert!(response.status().is_redirection());
        assert_eq!(response.headers()[header::LOCATION], "/");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/elsewhere")
            .body(Body::empty())
            .unwrap();
        let response = send(&state, request).await;
        assert!(response.status().is_redirection());
    }

    #[tokio::test]
    async fn test_static_files_are_served() {
        let state = test_state().await;

        let response = send(&state, get_request("/css/style.css")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("font-family"));
    }

    #[tokio::test]
    async fn test_catalog_failure_is_generic_500() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = Arc::new(AppState {
            db,
            static_dir: PathBuf::from(config::DEFAULT_STATIC_DIR),
        });

        let response = send(&state, get_request("/")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let html = body_text(response).await;
        assert!(html.contains("An internal database error occurred."));
        assert!(!html.contains("no such table"));
    }
}

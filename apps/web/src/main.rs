//! # OrderDesk Web Server
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OrderDesk Web Server                             │
//! │                                                                         │
//! │  Browser ───► HTTP (APP_PORT) ───► Handlers ───► MySQL                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use orderdesk_web::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Secrets live in .env; a missing file is fine when the environment is set.
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting OrderDesk web server...");

    let config = AppConfig::load()?;
    info!(
        port = config.app_port,
        database = %config.database.redacted_url(),
        pool_size = config.database.max_connections,
        "Configuration loaded"
    );

    orderdesk_web::run(config).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=orderdesk_db=trace` - Show trace for the database layer only
/// - Default: INFO, with debug for OrderDesk crates and request traces
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,orderdesk_web=debug,orderdesk_db=debug,sqlx=warn,tower_http=debug")
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

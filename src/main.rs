mod attendance;
mod auth;
mod config;
mod db;
mod error;
mod extractors;
mod handlers;
mod holidays;
mod middleware;
mod models;
mod openapi;
mod startup;

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use auth::JwksCache;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use handlers::MetricsState;
pub use holidays::HolidayService;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub jwks_cache: Arc<JwksCache>,
    pub holidays: Arc<HolidayService>,
    pub http: reqwest::Client,
    pub config: AppConfig,
    pub metrics: Arc<MetricsState>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing with conditional JSON/text output
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string()) == "json";

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,wio_tracker=debug,tower_http=debug".into());

    if use_json {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Human-readable for development
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Configuration error: {}", e);
        e
    })?;

    // Create database pool
    let db = db::create_pool(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to create database pool: {}", e);
        e
    })?;

    tracing::info!("Database pool created successfully");

    if config.run_migrations {
        db::run_migrations(&db).await.map_err(|e| {
            tracing::error!("Failed to run migrations: {}", e);
            e
        })?;
        tracing::info!("Migrations applied");
    }

    // Initialize metrics recorder
    let metrics_state = Arc::new(handlers::setup_metrics_recorder()?);
    tracing::info!("Metrics recorder initialized");

    // Shared outbound client for JWKS, holiday APIs and the auth admin API
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let jwks_cache = Arc::new(JwksCache::new(config.jwks_url(), http.clone()));
    let holidays = Arc::new(HolidayService::new(db.clone(), http.clone(), &config));

    let listen_addr = config.listen_addr.clone();

    // Create application state
    let state = Arc::new(AppState {
        db,
        jwks_cache,
        holidays,
        http,
        config,
        metrics: metrics_state,
    });

    // Build router
    let app = startup::build_router(state);

    // Start server
    let listener = TcpListener::bind(&listen_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

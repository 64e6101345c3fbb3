//! Streamline Dashboard - shipment tracking and staff inbox.
//!
//! # Architecture
//!
//! - Axum JSON API
//! - `PostgreSQL` (sqlx) or in-memory storage behind the `Backend` trait
//! - tower-sessions for login sessions
//! - Sentry + tracing for observability

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tower_sessions::MemoryStore;
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streamline_core::Role;
use streamline_dashboard::backend::MemoryBackend;
use streamline_dashboard::config::{BackendConfig, BootstrapAdmin, DashboardConfig};
use streamline_dashboard::db::{self, PgBackend};
use streamline_dashboard::routes;
use streamline_dashboard::services::auth::{hash_password, validate_password};
use streamline_dashboard::state::AppState;

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &DashboardConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing(config: &DashboardConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "streamline_dashboard=info,tower_http=debug".into());

    let json_layer = config
        .json_logs
        .then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!config.json_logs).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

async fn bootstrap_memory_admin(backend: &MemoryBackend, admin: &BootstrapAdmin) {
    let password = admin.password.expose_secret();
    validate_password(password).expect("Bootstrap admin password is too weak");
    let hash = hash_password(password).expect("Failed to hash bootstrap admin password");

    backend
        .provision_user(admin.email.clone(), hash, "Administrator", Role::Admin)
        .await
        .expect("Failed to provision bootstrap admin");
    tracing::info!(email = %admin.email, "bootstrap admin provisioned");
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = DashboardConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing(&config);

    let app = match &config.backend {
        BackendConfig::Postgres { database_url } => {
            let pool = db::create_pool(database_url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");

            // NOTE: Schema migrations are NOT run automatically on startup.
            // Run them explicitly via: cargo run -p streamline-cli -- migrate
            let store = PostgresStore::new(pool.clone());
            store
                .migrate()
                .await
                .expect("Failed to create session table");

            let state = AppState::new(config.clone(), Arc::new(PgBackend::new(pool)));
            routes::app(state, store)
        }
        BackendConfig::Memory { bootstrap_admin } => {
            tracing::warn!("using in-memory backend; data is lost on restart");
            let backend = MemoryBackend::new();
            if let Some(admin) = bootstrap_admin {
                bootstrap_memory_admin(&backend, admin).await;
            }

            let state = AppState::new(config.clone(), Arc::new(backend));
            routes::app(state, MemoryStore::default())
        }
    };

    // Sentry layers (outermost for full request coverage)
    let app = app
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

//! DocBox Server — BaaS-backed cloud file storage.
//!
//! Main entry point that wires the backend factory, services, and HTTP API
//! together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use docbox_api::state::AppState;
use docbox_backend::HostedBackendFactory;
use docbox_core::config::AppConfig;
use docbox_core::error::AppError;
use docbox_core::traits::BackendFactory;
use docbox_core::traits::revalidate::LoggingRevalidator;
use docbox_service::file::FileService;
use docbox_service::usage::UsageService;
use docbox_service::user::UserService;

#[tokio::main]
async fn main() {
    // Configuration problems are fatal before logging is even up.
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocBox v{}", env!("CARGO_PKG_VERSION"));

    let config = Arc::new(config);

    // ── Backend client factory ───────────────────────────────────
    let backend: Arc<dyn BackendFactory> =
        Arc::new(HostedBackendFactory::new(config.backend.clone()));
    tracing::info!(endpoint = %config.backend.endpoint, "Backend client initialized");

    // ── Services ─────────────────────────────────────────────────
    let revalidator = Arc::new(LoggingRevalidator);
    let user_service = Arc::new(UserService::new(Arc::clone(&backend), Arc::clone(&config)));
    let file_service = Arc::new(FileService::new(
        Arc::clone(&backend),
        revalidator,
        Arc::clone(&config),
    ));
    let usage_service = Arc::new(UsageService::new(Arc::clone(&backend), Arc::clone(&config)));
    tracing::info!("Services initialized");

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = AppState {
        config: Arc::clone(&config),
        user_service,
        file_service,
        usage_service,
    };

    let app = docbox_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("DocBox server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("DocBox server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! Hotel Backend
//!
//! HTTP API for hotel staff accounts and the restaurant menu.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and routing
//! - Services: signup/login orchestration and CRUD rules
//! - Repositories: `PersonStore` / `MenuStore` over PostgreSQL or memory
//! - Auth: Argon2 password hashing, HS256 tokens and the bearer gate

use anyhow::Result;
use hotel_backend::{config::AppConfig, routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        production,
        "Starting Hotel Backend"
    );

    if production {
        let problems = config.production_problems();
        if !problems.is_empty() {
            for problem in &problems {
                error!("Configuration error: {}", problem);
            }
            anyhow::bail!("Invalid production configuration");
        }
        if config.database.url.contains("localhost") {
            warn!("Database URL points at localhost in production");
        }
    }

    let state = AppState::connect(config).await?;
    let addr = format!("{}:{}", state.config().server.host, state.config().server.port);
    info!(ttl_secs = state.jwt().ttl_secs(), "Token issuer ready");
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// JSON lines in production, human-readable output otherwise
fn init_tracing(production: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if production {
            EnvFilter::new("hotel_backend=info,tower_http=info")
        } else {
            EnvFilter::new("hotel_backend=debug,tower_http=debug,sqlx=warn")
        }
    });

    let (json, pretty) = if production {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer().pretty()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, draining connections"),
        _ = terminate => info!("Received SIGTERM, draining connections"),
    }
}

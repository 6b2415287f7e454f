//! setlist-catalog - performer and recording catalog service
//!
//! Startup order: parse arguments, install logging, resolve configuration,
//! open the database, serve HTTP until Ctrl+C or SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use setlist_catalog::clock::SystemClock;
use setlist_catalog::{build_router, AppState};
use setlist_common::config::{Overrides, TomlConfig};
use setlist_common::db::init_database;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for setlist-catalog
#[derive(Parser, Debug)]
#[command(name = "setlist-catalog")]
#[command(about = "Performer and recording catalog service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "SETLIST_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "SETLIST_HOST")]
    host: Option<String>,

    /// SQLite database file
    #[arg(short, long, env = "SETLIST_DATABASE")]
    database: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "SETLIST_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise start at info and switch to the configured
    // level once the config file has been read.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let rust_log_set = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new("info")));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting setlist-catalog v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = TomlConfig::load_or_default(args.config.as_deref()).resolve(Overrides {
        host: args.host,
        port: args.port,
        database_path: args.database,
    });

    if !rust_log_set {
        match EnvFilter::try_new(&config.log_level) {
            Ok(level) => filter_handle
                .reload(level)
                .context("Failed to apply configured log level")?,
            Err(e) => warn!("Invalid log level '{}': {}", config.log_level, e),
        }
    }

    info!("Database path: {}", config.database_path.display());
    info!("Featured rotation epoch: {}", config.featured_epoch);

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState::new(pool, Arc::new(SystemClock), config.featured_epoch);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("setlist-catalog listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

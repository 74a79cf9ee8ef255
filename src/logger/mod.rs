//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Subscriber setup (plain or JSON, filtered by level or `RUST_LOG`)
//! - Server lifecycle logging
//! - Access logging with multiple formats

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::ServerError;

/// Tracing target of access log lines, so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber with configuration
///
/// Should be called once at application startup. `RUST_LOG` takes
/// precedence over `logging.level` when set.
pub fn init(config: &Config) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|e| ServerError::Logger(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = if config.logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| ServerError::Logger(e.to_string()))
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("Server listening on http://{addr}");
    let api_root = config.routes.api_root();
    tracing::info!(
        "API routes under {api_root}: POST {api_root}/disease/detect, GET {api_root}/ecommerce/products"
    );
    tracing::info!(
        workers = ?config.server.workers,
        max_connections = ?config.performance.max_connections,
        max_body_size = config.http.max_body_size,
        cors = config.http.enable_cors,
        "Loaded configuration"
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

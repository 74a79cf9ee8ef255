// Server module entry
// Listener setup, accept loop, connection serving and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is exposed as server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

use std::sync::Arc;
use tokio::sync::Notify;

use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

/// Bind, build the route table and serve until a shutdown signal arrives
pub async fn run(config: Config) -> Result<(), ServerError> {
    let addr = config.get_socket_addr()?;
    let listener = create_listener(addr)?;
    logger::log_server_start(&addr, &config);

    let state = Arc::new(AppState::new(config).await?);
    let shutdown = Arc::new(Notify::new());
    signal::start_signal_handler(Arc::clone(&shutdown));

    let local = tokio::task::LocalSet::new();
    local
        .run_until(start_server_loop(listener, state, shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

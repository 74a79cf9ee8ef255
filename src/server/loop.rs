// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use hyper_util::server::graceful::GracefulShutdown;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::error::ServerError;

/// Accept loop of the application server.
///
/// Must run inside a `LocalSet`: every connection is served by a local task.
/// Returns once `shutdown` is notified and in-flight connections have
/// finished or `performance.shutdown_timeout` has elapsed.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), ServerError> {
    let local_addr = listener.local_addr()?;
    let active_connections = Arc::new(AtomicUsize::new(0));
    let graceful = GracefulShutdown::new();
    tracing::debug!("Accept loop running on {local_addr}");

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &graceful);
                    }
                    Err(e) => tracing::error!("Failed to accept connection: {e}"),
                }
            }

            () = shutdown.notified() => {
                tracing::info!("Shutdown requested, no longer accepting on {local_addr}");
                break;
            }
        }
    }

    // Stop accepting before waiting on in-flight connections
    drop(listener);
    let shutdown_timeout = state.config.performance.shutdown_timeout;
    drain_connections(graceful, &active_connections, shutdown_timeout).await;
    Ok(())
}

/// Ask every open connection to close after its current request, then wait
/// for them up to `timeout_secs`. Idle keep-alive connections close at once.
async fn drain_connections(
    graceful: GracefulShutdown,
    active_connections: &AtomicUsize,
    timeout_secs: u64,
) {
    let open = graceful.count();
    if open > 0 {
        tracing::info!("Waiting for {open} connection(s) to finish");
    }

    match tokio::time::timeout(Duration::from_secs(timeout_secs), graceful.shutdown()).await {
        Ok(()) => tracing::info!("All connections closed"),
        Err(_) => {
            let remaining = active_connections.load(Ordering::SeqCst);
            tracing::warn!("Shutdown timeout reached with {remaining} connection(s) still open");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_returns_when_idle() {
        let counter = AtomicUsize::new(0);
        tokio::time::timeout(
            Duration::from_secs(1),
            drain_connections(GracefulShutdown::new(), &counter, 30),
        )
        .await
        .expect("drain without connections should return immediately");
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_gives_up_after_timeout() {
        let graceful = GracefulShutdown::new();
        // A watcher that is never attached stands in for a connection that never finishes
        let _stuck = graceful.watcher();

        let counter = AtomicUsize::new(1);
        let started = tokio::time::Instant::now();
        drain_connections(graceful, &counter, 2).await;
        assert!(started.elapsed() >= Duration::from_secs(2));
    }
}

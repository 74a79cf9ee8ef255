// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the signal listener task
///
/// The first shutdown signal notifies `shutdown`; `notify_one` stores a
/// permit, so the accept loop sees it even if it is busy at that moment.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                (Err(e), _) | (_, Err(e)) => {
                    tracing::error!("Failed to register signal handlers: {e}");
                    return;
                }
            };

        tracing::debug!("Signal handlers registered (pid {})", std::process::id());

        tokio::select! {
            _ = sigterm.recv() => tracing::info!("SIGTERM received, initiating graceful shutdown"),
            _ = sigint.recv() => tracing::info!("SIGINT received, initiating graceful shutdown"),
        }
        shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Ctrl+C received, initiating graceful shutdown");
                shutdown.notify_one();
            }
            Err(e) => tracing::error!("Failed to listen for Ctrl+C: {e}"),
        }
    });
}

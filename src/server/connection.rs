// Connection handling module
// Admits a TCP connection and serves it over HTTP/1.1

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::server::graceful::GracefulShutdown;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Decrements the active connection counter when the connection ends
struct ConnectionGuard(Arc<AtomicUsize>);

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Accept a connection, enforcing `performance.max_connections`.
///
/// Accepted connections are registered with `graceful` so shutdown can close
/// them once their in-flight request is answered.
///
/// Returns `false` when the connection was rejected.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    conn_counter: &Arc<AtomicUsize>,
    graceful: &GracefulShutdown,
) -> bool {
    // Increment first, then check, so concurrent accepts cannot overshoot
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);
    let guard = ConnectionGuard(Arc::clone(conn_counter));

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            tracing::warn!("Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected.");
            return false;
        }
    }

    if state.config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    if let Err(e) = stream.set_nodelay(true) {
        tracing::debug!("Failed to set TCP_NODELAY for {peer_addr}: {e}");
    }

    serve_connection(stream, peer_addr, Arc::clone(state), guard, graceful);
    true
}

/// Serve a single connection in a local task.
///
/// Keep-alive is on when `performance.keep_alive_timeout` is non-zero; idle
/// connections are closed by the header-read timeout or by shutdown. The
/// whole connection is bounded by the larger of the read and write timeouts.
fn serve_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
    guard: ConnectionGuard,
    graceful: &GracefulShutdown,
) {
    let io = TokioIo::new(stream);

    let perf = &state.config.performance;
    let timeout_duration = Duration::from_secs(perf.read_timeout.max(perf.write_timeout));

    let mut builder = http1::Builder::new();
    builder
        .keep_alive(perf.keep_alive_timeout > 0)
        .timer(TokioTimer::new())
        .header_read_timeout(Duration::from_secs(perf.read_timeout));

    let service_state = Arc::clone(&state);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&service_state), peer_addr)),
    );
    let conn = graceful.watch(conn);

    tokio::task::spawn_local(async move {
        let _guard = guard;

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                tracing::warn!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                );
            }
        }
    });
}

// Server loop module
// Accepts connections until a stop is requested, then drains open connections

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::{accept_connection, ConnectionTracker};
use crate::config::AppState;
use crate::logger;

/// Run the accept loop on `listener` until `state.shutdown` fires
///
/// After the stop request the listener is closed right away, so new
/// connection attempts are refused. Open connections finish their current
/// exchange; the loop waits for them up to `performance.shutdown_timeout`
/// seconds and then returns.
pub async fn run_server(listener: TcpListener, state: Arc<AppState>) {
    let tracker = Arc::new(ConnectionTracker::new());

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &tracker);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = state.shutdown.wait() => break,
        }
    }

    drop(listener);
    logger::log_shutdown_draining(tracker.active());

    let grace = Duration::from_secs(state.config.performance.shutdown_timeout);
    if tokio::time::timeout(grace, tracker.wait_idle()).await.is_err() {
        logger::log_warning(&format!(
            "{} connection(s) still open after {}s, abandoning them",
            tracker.active(),
            grace.as_secs()
        ));
    }

    logger::log_shutdown_complete();
}

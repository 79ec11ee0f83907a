// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;

use super::Shutdown;
use crate::logger;

/// Start signal handlers (Unix)
///
/// Spawns a background task that turns the first SIGTERM or SIGINT into a
/// stop request. The task ends once a stop has been requested by any means.
/// Must be called from within a tokio runtime.
///
/// | Signal  | Action        |
/// |---------|---------------|
/// | SIGTERM | Graceful stop |
/// | SIGINT  | Graceful stop |
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Shutdown>) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::spawn(async move {
        let source = tokio::select! {
            _ = sigterm.recv() => "SIGTERM",
            _ = sigint.recv() => "SIGINT (Ctrl+C)",
            () = shutdown.wait() => return,
        };

        logger::log_shutdown_requested(source);
        shutdown.trigger();
    });

    Ok(())
}

/// Non-Unix fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Shutdown>) -> std::io::Result<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    logger::log_shutdown_requested("Ctrl+C");
                    shutdown.trigger();
                }
            }
            () = shutdown.wait() => {}
        }
    });

    Ok(())
}

// Server process module
// Owns the listening socket and the shared state for one server instance

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::listener::create_listener;
use super::server_loop::run_server;
use super::Shutdown;
use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;

/// A bound, not yet running server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    state: Arc<AppState>,
}

impl Server {
    /// Resolve the configured address, build the state and bind the listener
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(config: &Config) -> Result<Self, ServerError> {
        let addr = config.get_socket_addr()?;
        let state = Arc::new(AppState::new(config.clone())?);

        let bind_error = |source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        };
        let listener = create_listener(addr).map_err(bind_error)?;
        let local_addr = listener.local_addr().map_err(bind_error)?;

        Ok(Self {
            listener,
            local_addr,
            state,
        })
    }

    /// Actual bound address (resolves port 0)
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Handle that stops [`Server::run`] when triggered
    pub fn shutdown_handle(&self) -> Arc<Shutdown> {
        Arc::clone(&self.state.shutdown)
    }

    /// Serve until stopped via `/stop`, a signal, or [`Server::shutdown_handle`]
    pub async fn run(self) {
        logger::log_server_start(&self.local_addr, &self.state.config);
        run_server(self.listener, self.state).await;
    }
}

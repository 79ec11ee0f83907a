// Application state module
// Everything a connection needs, built once at startup and shared read-only

use std::sync::Arc;

use super::types::Config;
use crate::error::ServerError;
use crate::http::mime::MimeTable;
use crate::routing::RouteTable;
use crate::server::Shutdown;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Never modified after startup
    pub routes: RouteTable,
    pub mime: MimeTable,
    /// Shared with the accept loop and the `/stop` route
    pub shutdown: Arc<Shutdown>,
}

impl AppState {
    /// Build state with the built-in route set for `config.site`
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let routes = RouteTable::builtin(&config.site)?;
        let mime = MimeTable::new(&config.mime);

        Ok(Self {
            config,
            routes,
            mime,
            shutdown: Arc::new(Shutdown::new()),
        })
    }
}

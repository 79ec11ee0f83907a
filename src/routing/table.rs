//! Route table module
//!
//! The fixed set of routes consulted before the static mount. The table is
//! built once at startup and exposes no way to change it afterwards.

use hyper::Method;
use std::path::PathBuf;

use super::matcher::{match_route, PathPattern, RouteMatch};
use crate::config::SiteConfig;
use crate::error::ServerError;

/// What a matched route does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Fixed `text/plain` body
    Text { body: String },
    /// A specific file with a fixed Content-Type
    File { path: PathBuf, content_type: String },
    /// `text/plain` body set to a path capture group
    Capture { group: usize },
    /// `text/plain` body set to the request body
    EchoBody,
    /// Stop the server
    Shutdown,
}

/// A (method, pattern) pair bound to an action
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub action: RouteAction,
}

impl Route {
    pub fn get(pattern: PathPattern, action: RouteAction) -> Self {
        Self {
            method: Method::GET,
            pattern,
            action,
        }
    }
}

/// Ordered, immutable list of routes; first match wins
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub const fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The server's route set, in dispatch order
    pub fn builtin(site: &SiteConfig) -> Result<Self, ServerError> {
        Ok(Self::new(vec![
            Route::get(
                PathPattern::exact("/hi"),
                RouteAction::Text {
                    body: "Hello World!".to_string(),
                },
            ),
            Route::get(
                PathPattern::exact("/"),
                RouteAction::File {
                    path: site.web_root.join("index.html"),
                    content_type: "text/html".to_string(),
                },
            ),
            Route::get(
                PathPattern::exact("/page/fileindex.html"),
                RouteAction::File {
                    path: site.index_page_path(),
                    content_type: "text/html".to_string(),
                },
            ),
            Route::get(
                PathPattern::regex(r"/numbers/(\d+)")?,
                RouteAction::Capture { group: 1 },
            ),
            Route::get(PathPattern::exact("/body-header-param"), RouteAction::EchoBody),
            Route::get(PathPattern::exact("/stop"), RouteAction::Shutdown),
        ]))
    }

    /// Select the route for a request
    pub fn find(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        match_route(&self.routes, method, path)
    }
}

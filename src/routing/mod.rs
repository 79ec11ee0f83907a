//! Routing module
//!
//! Provides the route table consulted before static file serving:
//! - Exact path routes
//! - Regular-expression routes with capture groups
//! - First match in registration order wins

mod matcher;
mod table;

pub use matcher::{match_route, PathPattern, RouteMatch};
pub use table::{Route, RouteAction, RouteTable};

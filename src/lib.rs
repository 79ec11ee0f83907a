//! Minimal HTTP file server
//!
//! Serves a web root over HTTP/1.1, regenerates a download index for its
//! storage directory at startup, and answers a small fixed set of routes,
//! including `GET /stop` which shuts the server down.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod indexer;
pub mod logger;
pub mod routing;
pub mod server;

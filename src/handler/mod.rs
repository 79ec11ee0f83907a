//! Request handler module
//!
//! Responsible for request dispatch: the fixed route set first, then the
//! static file mount.

pub mod demo;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;

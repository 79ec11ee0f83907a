//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific business logic.

pub mod mime;
pub mod request;
pub mod response;

// Re-export commonly used types
pub use mime::MimeTable;
pub use request::RequestInfo;
pub use response::{
    build_404_response, build_405_response, build_413_response, build_error_response,
    build_ok_response, build_text_response, HttpResponse,
};

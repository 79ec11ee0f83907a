//! Demonstration route handlers

use crate::http::{build_text_response, HttpResponse, RequestInfo};
use crate::logger;
use crate::routing::RouteMatch;
use crate::server::Shutdown;

/// Reply with a fixed text body
pub fn text(body: &str) -> HttpResponse {
    build_text_response(body.to_string())
}

/// Reply with a capture group of the matched path
pub fn capture(matched: &RouteMatch<'_>, group: usize) -> HttpResponse {
    build_text_response(matched.capture(group).to_string())
}

/// Echo the request body back as `text/plain`
///
/// `Content-Length` and the `key` parameter are looked at but never change
/// the reply.
pub fn body_header_param(request: &RequestInfo) -> HttpResponse {
    if request.has_header("Content-Length") {
        let length = request.header("Content-Length").unwrap_or_default();
        logger::log_debug(&format!("[body-header-param] Content-Length: {length}"));
    }
    if request.has_param("key") {
        let key = request.param("key").unwrap_or_default();
        logger::log_debug(&format!("[body-header-param] key={key}"));
    }

    build_text_response(request.body.clone())
}

/// Ask the server to stop, replying while connections drain
pub fn stop(shutdown: &Shutdown) -> HttpResponse {
    logger::log_shutdown_requested("GET /stop");
    shutdown.trigger();
    build_text_response("Server stopping")
}

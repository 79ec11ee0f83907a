//! HTTP response building module
//!
//! Builders for the responses the server sends. Bodies stay as plain `Bytes`
//! so the exchange logger can read them; the connection layer wraps them in
//! `Full` at the very end.

use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use crate::logger;

/// Response type produced by every handler
pub type HttpResponse = Response<Bytes>;

/// Build 200 response with the given body and Content-Type
pub fn build_ok_response(body: impl Into<Bytes>, content_type: &str) -> HttpResponse {
    build_response(StatusCode::OK, body.into(), content_type)
}

/// Build 200 `text/plain` response
pub fn build_text_response(body: impl Into<Bytes>) -> HttpResponse {
    build_ok_response(body, "text/plain")
}

/// Build 400 Bad Request response
pub fn build_400_response() -> HttpResponse {
    build_response(
        StatusCode::BAD_REQUEST,
        Bytes::from_static(b"400 Bad Request"),
        "text/plain",
    )
}

/// Build 404 Not Found response
pub fn build_404_response() -> HttpResponse {
    build_response(
        StatusCode::NOT_FOUND,
        Bytes::from_static(b"404 Not Found"),
        "text/plain",
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> HttpResponse {
    let mut response = build_response(
        StatusCode::METHOD_NOT_ALLOWED,
        Bytes::from_static(b"405 Method Not Allowed"),
        "text/plain",
    );
    response
        .headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static("GET, HEAD"));
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> HttpResponse {
    build_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        Bytes::from_static(b"413 Payload Too Large"),
        "text/plain",
    )
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> HttpResponse {
    build_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        Bytes::from_static(b"500 Internal Server Error"),
        "text/plain",
    )
}

/// Build an error response for a status code
pub fn build_error_response(status: StatusCode) -> HttpResponse {
    match status {
        StatusCode::BAD_REQUEST => build_400_response(),
        StatusCode::NOT_FOUND => build_404_response(),
        StatusCode::METHOD_NOT_ALLOWED => build_405_response(),
        StatusCode::PAYLOAD_TOO_LARGE => build_413_response(),
        _ => build_500_response(),
    }
}

/// Drop the body of a response to a HEAD request, keeping its headers
pub fn strip_body(response: HttpResponse) -> HttpResponse {
    let (parts, _) = response.into_parts();
    Response::from_parts(parts, Bytes::new())
}

fn build_response(status: StatusCode, body: Bytes, content_type: &str) -> HttpResponse {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, body.len())
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error(status, &e);
            let mut fallback = Response::new(Bytes::new());
            *fallback.status_mut() = status;
            fallback
        })
}

/// Log response build error
fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
}

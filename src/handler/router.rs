//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: body limits, route table
//! dispatch, static mount fallback, and per-request logging.

use crate::config::AppState;
use crate::handler::{demo, static_files};
use crate::http::{self, response::strip_body, HttpResponse, RequestInfo};
use crate::logger::{self, dump, AccessLogEntry};
use crate::routing::RouteAction;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    let started = Instant::now();
    let (parts, body) = req.into_parts();

    // 1. Read the body within the configured limit
    let (info, response) = match read_body(&parts, body, state.config.http.max_body_size).await {
        Ok(bytes) => {
            let info = RequestInfo::from_parts(&parts, bytes);
            logger::log_headers(&info.headers, state.config.logging.show_headers);

            // 2. Route table, then static mount
            let response = dispatch(&info, &state).await;
            (info, response)
        }
        Err(status) => (
            RequestInfo::from_parts(&parts, Bytes::new()),
            http::build_error_response(status),
        ),
    };

    // 3. HEAD and Server header
    let response = finalize(response, &info, &state.config.http.server_name);

    // 4. Logging
    let logging = &state.config.logging;
    if logging.access_log {
        let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        let entry = AccessLogEntry::from_exchange(peer_addr, &info, &response, elapsed);
        logger::log_access(&entry, &logging.access_log_format);
    }
    if logging.dump_exchanges {
        logger::log_exchange(&dump::format_exchange(&info, &response));
    }

    Ok(response.map(Full::new))
}

/// Select and run the handler for a request
async fn dispatch(info: &RequestInfo, state: &AppState) -> HttpResponse {
    if let Some(matched) = state.routes.find(&info.method, &info.path) {
        return match &matched.route.action {
            RouteAction::Text { body } => demo::text(body),
            RouteAction::File { path, content_type } => {
                static_files::serve_file(path, content_type).await
            }
            RouteAction::Capture { group } => demo::capture(&matched, *group),
            RouteAction::EchoBody => demo::body_header_param(info),
            RouteAction::Shutdown => demo::stop(&state.shutdown),
        };
    }

    match info.method {
        Method::GET | Method::HEAD => static_files::serve_mount(state, &info.path).await,
        _ => {
            logger::log_warning(&format!("Method not allowed: {} {}", info.method, info.path));
            http::build_405_response()
        }
    }
}

/// Collect the request body, answering with the status to send on failure
async fn read_body<B>(parts: &Parts, body: B, max_body_size: u64) -> Result<Bytes, StatusCode>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn Error + Send + Sync>>,
{
    if let Some(status) = check_body_size(parts, max_body_size) {
        return Err(status);
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_error(&format!(
                "Request body exceeded {max_body_size} bytes without a matching Content-Length"
            ));
            Err(StatusCode::PAYLOAD_TOO_LARGE)
        }
        Err(e) => {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(parts: &Parts, max_body_size: u64) -> Option<StatusCode> {
    let content_length = parts.headers.get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(StatusCode::PAYLOAD_TOO_LARGE)
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

fn finalize(response: HttpResponse, info: &RequestInfo, server_name: &str) -> HttpResponse {
    let mut response = if info.is_head() {
        strip_body(response)
    } else {
        response
    };

    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(_) => logger::log_warning(&format!("Invalid server name '{server_name}'")),
    }
    response
}

//! Request snapshot module
//!
//! A fully-read, immutable view of an inbound request, decoupled from hyper's
//! streaming body so handlers and the exchange logger can inspect it freely.

use hyper::body::Bytes;
use hyper::http::request::Parts;
use hyper::{Method, Version};

/// Request as seen by route handlers
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    /// Raw URI path (still percent-encoded)
    pub path: String,
    pub version: Version,
    /// Query string without leading `?`
    pub query: Option<String>,
    /// Decoded query parameters in URL order
    pub params: Vec<(String, String)>,
    /// Headers in arrival order
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl RequestInfo {
    /// Build from request head and the collected body
    pub fn from_parts(parts: &Parts, body: Bytes) -> Self {
        let query = parts.uri.query().map(ToString::to_string);
        let params = query
            .as_deref()
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        let headers = parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        Self {
            method: parts.method.clone(),
            path: parts.uri.path().to_string(),
            version: parts.version,
            query,
            params,
            headers,
            body,
        }
    }

    /// Case-insensitive header presence check
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// First value of a header, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.param(name).is_some()
    }

    /// First value of a query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Protocol name as written on the request line, e.g. `HTTP/1.1`
pub const fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/1.1",
    }
}

//! Exchange dump module
//!
//! Human-readable rendering of a complete request/response pair, for
//! diagnosing what a client actually sent and got back.

use std::fmt::Write;

use crate::http::request::{version_str, RequestInfo};
use crate::http::HttpResponse;

const REQUEST_RULE: &str = "================================";
const RESPONSE_RULE: &str = "--------------------------------";

/// Render a request/response pair
///
/// ```text
/// ================================
/// GET HTTP/1.1 /body-header-param?key=1
/// host: localhost:1234
/// --------------------------------
/// 200 HTTP/1.1
/// content-type: text/plain
///
/// <body>
/// ```
pub fn format_exchange(request: &RequestInfo, response: &HttpResponse) -> String {
    let mut s = String::new();

    let _ = writeln!(s, "{REQUEST_RULE}");
    let _ = writeln!(
        s,
        "{} {} {}{}",
        request.method,
        version_str(request.version),
        request.path,
        format_params(&request.params)
    );
    for (name, value) in &request.headers {
        let _ = writeln!(s, "{name}: {value}");
    }

    let _ = writeln!(s, "{RESPONSE_RULE}");
    let _ = writeln!(
        s,
        "{} {}",
        response.status().as_u16(),
        version_str(response.version())
    );
    for (name, value) in response.headers() {
        let _ = writeln!(s, "{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
    s.push('\n');

    let body = response.body();
    if !body.is_empty() {
        match std::str::from_utf8(body) {
            Ok(text) => s.push_str(text),
            Err(_) => {
                let _ = write!(s, "[{} bytes of binary data]", body.len());
            }
        }
    }
    s.push('\n');

    s
}

/// `?k1=v1&k2=v2` in URL order, empty when there are no parameters
fn format_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .enumerate()
        .map(|(i, (k, v))| format!("{}{k}={v}", if i == 0 { '?' } else { '&' }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{build_ok_response, build_text_response};
    use hyper::body::Bytes;
    use hyper::Request;

    fn request(uri: &str, headers: &[(&str, &str)]) -> RequestInfo {
        let mut builder = Request::builder().uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        RequestInfo::from_parts(&parts, Bytes::new())
    }

    #[test]
    fn test_format_exchange_layout() {
        let req = request("/hi?b=2&a=1", &[("host", "localhost:1234")]);
        let res = build_text_response("Hello World!");

        let dump = format_exchange(&req, &res);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], REQUEST_RULE);
        assert_eq!(lines[1], "GET HTTP/1.1 /hi?b=2&a=1");
        assert_eq!(lines[2], "host: localhost:1234");
        assert_eq!(lines[3], RESPONSE_RULE);
        assert_eq!(lines[4], "200 HTTP/1.1");
        assert!(lines.contains(&"content-type: text/plain"));
        assert!(lines.contains(&"content-length: 12"));
        assert!(dump.ends_with("\n\nHello World!\n"));
    }

    #[test]
    fn test_format_exchange_without_params_or_body() {
        let req = request("/stop", &[]);
        let res = hyper::Response::new(Bytes::new());

        let dump = format_exchange(&req, &res);
        assert!(dump.contains("\nGET HTTP/1.1 /stop\n"));
        assert!(dump.ends_with("200 HTTP/1.1\n\n\n"));
    }

    #[test]
    fn test_format_exchange_binary_body() {
        let req = request("/storage/blob.bin", &[]);
        let res = build_ok_response(vec![0xff_u8, 0xfe, 0x00], "application/octet-stream");

        let dump = format_exchange(&req, &res);
        assert!(dump.contains("[3 bytes of binary data]"));
    }
}

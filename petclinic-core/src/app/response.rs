//! Response helpers for the clinic server.
//!
//! Every helper sets `Content-Length` so the access log can report it.

use hyper::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use hyper::{Method, Response, StatusCode};

use crate::http::{body_from, Resp};

fn with_body(status: StatusCode, content_type: &str, body: String) -> Resp {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, body.len())
        .body(body_from(body))
        .expect("valid HTTP response")
}

/// HTML response with the given status code.
pub fn html(status: StatusCode, body: impl Into<String>) -> Resp {
    with_body(status, "text/html; charset=utf-8", body.into())
}

/// JSON response with the given status code.
pub fn json(status: StatusCode, body: &serde_json::Value) -> Resp {
    with_body(status, "application/json", body.to_string())
}

/// Plain-text response with the given status code.
pub fn text(status: StatusCode, body: impl Into<String>) -> Resp {
    with_body(status, "text/plain; charset=utf-8", body.into())
}

/// 302 redirect to the given location.
pub fn redirect(location: &str) -> Resp {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(body_from(""))
        .expect("valid HTTP response")
}

/// 405 carrying the methods the path does accept
pub fn method_not_allowed(allowed: &[Method]) -> Resp {
    let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
    let mut resp = text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    if let Ok(value) = allow.parse() {
        resp.headers_mut().insert(ALLOW, value);
    }
    resp
}

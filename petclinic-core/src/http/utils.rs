//! HTTP utility functions for the hyper-based server

use bytes::Bytes;
use http_body_util::{combinators::BoxBody, BodyExt, Full, LengthLimitError, Limited};
use hyper::{HeaderMap, Request, Response};
use std::convert::Infallible;
use std::time::Duration;

pub type RespBody = BoxBody<Bytes, Infallible>;
pub type Req = Request<hyper::body::Incoming>;
pub type Resp = Response<RespBody>;

/// Create a response body from any data that can be converted to Bytes
pub fn body_from<T: Into<Bytes>>(data: T) -> RespBody {
    Full::new(data.into()).boxed()
}

/// Why a request body could not be read
#[derive(Debug, thiserror::Error)]
pub enum BodyReadError {
    #[error("request body exceeds {0} bytes")]
    TooLarge(usize),
    #[error("request body not received within {0:?}")]
    Timeout(Duration),
    #[error("failed to read request body: {0}")]
    Io(String),
}

/// Collect a request body, bounded in size and time
pub async fn read_body<B>(body: B, max_size: usize, timeout: Duration) -> Result<Bytes, BodyReadError>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let collected = tokio::time::timeout(timeout, Limited::new(body, max_size).collect())
        .await
        .map_err(|_| BodyReadError::Timeout(timeout))?;

    match collected {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            Err(BodyReadError::TooLarge(max_size))
        }
        Err(err) => Err(BodyReadError::Io(err.to_string())),
    }
}

/// Client IP from proxy headers (`X-Forwarded-For`, then `X-Real-IP`)
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    forwarded.or(real_ip).map(str::to_string)
}

/// Resolve the real client IP.
///
/// Proxy headers are only trusted when the socket peer is loopback or a
/// private address.
pub fn resolve_client_ip(headers: &HeaderMap, remote_addr: Option<std::net::SocketAddr>) -> String {
    let Some(remote_addr) = remote_addr else {
        return "-".to_string();
    };
    let ip = remote_addr.ip();
    let is_trusted_proxy = ip.is_loopback()
        || match ip {
            std::net::IpAddr::V4(v4) => v4.is_private(),
            std::net::IpAddr::V6(_) => false,
        };

    if is_trusted_proxy {
        forwarded_ip(headers).unwrap_or_else(|| ip.to_string())
    } else {
        ip.to_string()
    }
}

/// Log an HTTP access entry in structured JSON format
pub fn log_access_ip<B>(
    remote_ip: &str,
    method: &str,
    path: &str,
    resp: &Response<B>,
    start: std::time::Instant,
) {
    let status = resp.status().as_u16();
    let len = resp
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    let dur_ms = start.elapsed().as_millis();
    log::info!(
        "{{\"remote\":\"{}\",\"method\":\"{}\",\"path\":\"{}\",\"status\":{},\"len\":\"{}\",\"dur_ms\":{}}}",
        escape_json_value(remote_ip),
        escape_json_value(method),
        escape_json_value(path),
        status,
        escape_json_value(len),
        dur_ms
    );
}

/// Escape a string for safe inclusion in a JSON value.
///
/// Handles `"`, `\`, and control characters (U+0000–U+001F).
fn escape_json_value(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

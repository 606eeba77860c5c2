//! HTTP plumbing shared by the server: body types, client address
//! resolution, request body reading and the access log.

pub mod utils;

pub use utils::{
    body_from, log_access_ip, read_body, resolve_client_ip, BodyReadError, Req, Resp, RespBody,
};

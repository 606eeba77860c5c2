//! Clinic server
//!
//! Owns the route table, turns requests into handler calls and views into
//! responses.
//!
//! # Example
//!
//! ```no_run
//! use petclinic_core::{Clinic, ClinicServer};
//!
//! # async fn example() -> anyhow::Result<()> {
//! ClinicServer::new()
//!     .with_port(8080)
//!     .with_clinic(Clinic::in_memory(true))
//!     .build()?
//!     .serve()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod response;
pub mod router;

pub use builder::ClinicServerBuilder;
pub use router::{Endpoint, PathParams, RouteMatch, Router};

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::FutureExt;
use hyper::header::ACCEPT;
use hyper::{HeaderMap, Method, StatusCode, Uri};

use crate::binding::Form;
use crate::config::ClinicConfig;
use crate::handlers::{self, Clinic};
use crate::http::{self as http_utils, BodyReadError, Req, Resp};
use crate::view::{html, Page, Representation, View};
use crate::ClinicError;

/// Everything `respond` needs from a request, already read into memory
#[derive(Debug, Clone)]
pub struct RequestInput {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub remote: Option<SocketAddr>,
}

impl RequestInput {
    pub fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.parse().unwrap_or_else(|_| Uri::from_static("/")),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            remote: None,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    /// POST with an urlencoded form body
    pub fn post_form(uri: &str, body: &str) -> Self {
        let mut input = Self::new(Method::POST, uri);
        input.headers.insert(
            hyper::header::CONTENT_TYPE,
            hyper::header::HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        input.body = Bytes::copy_from_slice(body.as_bytes());
        input
    }

    pub fn with_header(mut self, name: hyper::header::HeaderName, value: &'static str) -> Self {
        self.headers.insert(name, hyper::header::HeaderValue::from_static(value));
        self
    }

    fn query(&self) -> Result<Form, ClinicError> {
        Form::parse(self.uri.query().unwrap_or_default())
    }

    fn form(&self) -> Result<Form, ClinicError> {
        let body = std::str::from_utf8(&self.body)
            .map_err(|_| ClinicError::BadRequest("form body is not valid UTF-8".into()))?;
        Form::parse(body)
    }
}

/// The clinic web application server
pub struct ClinicServer {
    config: ClinicConfig,
    clinic: Clinic,
    router: Router,
}

impl ClinicServer {
    /// Builder with configuration loaded from `config.toml` and the environment
    pub fn new() -> ClinicServerBuilder {
        ClinicServerBuilder::new()
    }

    pub fn with_config(config: ClinicConfig) -> ClinicServerBuilder {
        ClinicServerBuilder::with_config(config)
    }

    pub fn config(&self) -> &ClinicConfig {
        &self.config
    }

    pub fn clinic(&self) -> &Clinic {
        &self.clinic
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serve until `shutdown` completes. In-flight connections are left to
    /// finish on their own tasks.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.config.server.bind_address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        log::info!("Server listening on http://{}", addr);

        let server = Arc::new(self);
        tokio::pin!(shutdown);

        loop {
            let (stream, remote_addr) = tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        log::warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                },
                _ = &mut shutdown => {
                    log::info!("Shutdown requested, no longer accepting connections");
                    return Ok(());
                }
            };
            let server = server.clone();

            tokio::spawn(async move {
                let io = hyper_util::rt::TokioIo::new(stream);

                let service = hyper::service::service_fn(move |req| {
                    let server = server.clone();
                    async move { Ok::<_, Infallible>(server.handle_request(req, remote_addr).await) }
                });

                if let Err(err) = hyper::server::conn::http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    log::error!("Connection error from {}: {}", remote_addr, err);
                }
            });
        }
    }

    async fn handle_request(&self, req: Req, remote_addr: SocketAddr) -> Resp {
        let start = Instant::now();
        let (parts, body) = req.into_parts();
        let timeout = Duration::from_secs(self.config.server.request_timeout);

        let body = match http_utils::read_body(body, self.config.server.max_body_size, timeout).await
        {
            Ok(body) => body,
            Err(err) => {
                let status = match err {
                    BodyReadError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                    BodyReadError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
                    BodyReadError::Io(_) => StatusCode::BAD_REQUEST,
                };
                log::warn!("{} {}: {}", parts.method, parts.uri.path(), err);
                let resp = response::text(status, err.to_string());
                let remote = http_utils::resolve_client_ip(&parts.headers, Some(remote_addr));
                http_utils::log_access_ip(&remote, parts.method.as_str(), parts.uri.path(), &resp, start);
                return resp;
            }
        };

        self.respond(RequestInput {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            remote: Some(remote_addr),
        })
        .await
    }

    /// Route one request and produce its response, writing one access-log line
    pub async fn respond(&self, input: RequestInput) -> Resp {
        let start = Instant::now();
        let resp = self.respond_inner(&input).await;
        let remote = http_utils::resolve_client_ip(&input.headers, input.remote);
        http_utils::log_access_ip(&remote, input.method.as_str(), input.uri.path(), &resp, start);
        resp
    }

    async fn respond_inner(&self, input: &RequestInput) -> Resp {
        if input.body.len() > self.config.server.max_body_size {
            return response::text(StatusCode::PAYLOAD_TOO_LARGE, "Payload Too Large");
        }

        let path = input.uri.path();
        let (endpoint, params) = match self.router.match_route(&input.method, path) {
            RouteMatch::Found(endpoint, params) => (endpoint, params),
            RouteMatch::MethodNotAllowed(allowed) => return response::method_not_allowed(&allowed),
            RouteMatch::NotFound => {
                let page = Page::Error {
                    status: StatusCode::NOT_FOUND.as_u16(),
                    message: format!("No page at {}", path),
                };
                return response::html(StatusCode::NOT_FOUND, html::render(&page));
            }
        };

        let outcome = AssertUnwindSafe(self.dispatch(endpoint, &params, input))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ClinicError::Internal("request handler panicked".into())));

        match outcome {
            Ok(view) => into_response(view),
            Err(err) => error_response(&err),
        }
    }

    async fn dispatch(
        &self,
        endpoint: Endpoint,
        params: &PathParams,
        input: &RequestInput,
    ) -> crate::Result<View> {
        use handlers::{owners, pets, system, vets, visits};

        let clinic = &self.clinic;
        match endpoint {
            Endpoint::Welcome => system::welcome(clinic).await,
            Endpoint::Crash => system::crash(clinic).await,
            Endpoint::FindOwnersForm => owners::init_find_form(clinic).await,
            Endpoint::FindOwners => owners::process_find_form(clinic, &input.query()?).await,
            Endpoint::NewOwnerForm => owners::init_creation_form(clinic).await,
            Endpoint::CreateOwner => owners::process_creation_form(clinic, &input.form()?).await,
            Endpoint::ShowOwner => owners::show_owner(clinic, params.id("ownerId")?).await,
            Endpoint::EditOwnerForm => owners::init_update_form(clinic, params.id("ownerId")?).await,
            Endpoint::UpdateOwner => {
                owners::process_update_form(clinic, params.id("ownerId")?, &input.form()?).await
            }
            Endpoint::NewPetForm => pets::init_creation_form(clinic, params.id("ownerId")?).await,
            Endpoint::CreatePet => {
                pets::process_creation_form(clinic, params.id("ownerId")?, &input.form()?).await
            }
            Endpoint::EditPetForm => {
                pets::init_update_form(clinic, params.id("ownerId")?, params.id("petId")?).await
            }
            Endpoint::UpdatePet => {
                pets::process_update_form(
                    clinic,
                    params.id("ownerId")?,
                    params.id("petId")?,
                    &input.form()?,
                )
                .await
            }
            Endpoint::NewVisitForm => {
                visits::init_new_visit_form(clinic, params.id("ownerId")?, params.id("petId")?)
                    .await
            }
            Endpoint::CreateVisit => {
                visits::process_new_visit_form(
                    clinic,
                    params.id("ownerId")?,
                    params.id("petId")?,
                    &input.form()?,
                )
                .await
            }
            Endpoint::VetsHtml => Ok(Representation::Html.vets(vets::vet_list(clinic).await?)),
            Endpoint::Vets => {
                let accept = input.headers.get(ACCEPT).and_then(|v| v.to_str().ok());
                Ok(Representation::from_accept(accept).vets(vets::vet_list(clinic).await?))
            }
        }
    }
}

fn into_response(view: View) -> Resp {
    match view {
        View::Page(page) => {
            let status = match &page {
                Page::Error { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                }
                _ => StatusCode::OK,
            };
            response::html(status, html::render(&page))
        }
        View::Redirect(location) => response::redirect(&location),
        View::Body(body) => response::json(StatusCode::OK, &body),
    }
}

fn error_response(err: &ClinicError) -> Resp {
    let status = err.status();
    if status.is_server_error() {
        log::error!("Request failed: {}", err);
    } else {
        log::debug!("Request rejected: {}", err);
    }
    let page = Page::Error { status: status.as_u16(), message: err.to_string() };
    response::html(status, html::render(&page))
}

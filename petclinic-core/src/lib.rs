//! Petclinic - Core
//!
//! A small clinic-management web application: owners register pets, pets
//! accrue visits, and veterinarians are listed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use petclinic_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ClinicServer::new()
//!         .with_port(8080)
//!         .with_clinic(Clinic::in_memory(true))
//!         .build()?
//!         .serve()
//!         .await
//! }
//! ```
//!
//! # Architecture
//!
//! Leaves first:
//!
//! - [`model`] - Owners, pets, visits, vets and pet types
//! - [`repository`] - Persistence collaborator traits and the in-memory store
//! - [`validation`] - Field-scoped errors and the per-form validators
//! - [`binding`] - Static field-mapping tables that bind form input onto models
//! - [`handlers`] - One function per use case, returning a [`view::View`]
//! - [`view`] - Routing decisions and the HTML / JSON presentation adapters
//! - [`app`] - HTTP server, route table and request dispatch
//! - [`config`] / [`logging`] - Layered configuration and the process logger

pub mod app;
pub mod binding;
pub mod config; // Configuration system with TOML support
pub mod handlers;
pub mod http;
pub mod logging; // Structured logging on top of the standard log crate
pub mod model;
pub mod repository;
pub mod validation;
pub mod view;

pub mod prelude;

pub use app::{ClinicServer, ClinicServerBuilder};
pub use handlers::Clinic;

/// Result type for handler operations
pub type Result<T> = std::result::Result<T, ClinicError>;

/// Error raised by request handlers.
///
/// Validation failures are *not* errors: they travel inside the rendered
/// form as a [`validation::BindingResult`].
#[derive(Debug, thiserror::Error)]
pub enum ClinicError {
    /// A lookup by id found nothing (client error)
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// The request itself is malformed (bad path id, bad encoding)
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The store failed in a way the handler cannot recover from
    #[error("repository error: {0}")]
    Repository(repository::RepositoryError),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<repository::RepositoryError> for ClinicError {
    fn from(err: repository::RepositoryError) -> Self {
        match err {
            repository::RepositoryError::NotFound { entity, id } => {
                ClinicError::NotFound { entity, id }
            }
            other => ClinicError::Repository(other),
        }
    }
}

impl ClinicError {
    /// HTTP status this error is surfaced with
    pub fn status(&self) -> hyper::StatusCode {
        match self {
            ClinicError::NotFound { .. } => hyper::StatusCode::NOT_FOUND,
            ClinicError::BadRequest(_) => hyper::StatusCode::BAD_REQUEST,
            ClinicError::Repository(_) | ClinicError::Internal(_) => {
                hyper::StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

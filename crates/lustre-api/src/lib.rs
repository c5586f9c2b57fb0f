//! # lustre-api
//!
//! HTTP API server for lustre catalog search.
//!
//! - [`config`]: layered configuration (defaults, TOML, `LUSTRE_*` env)
//! - [`routes`]: search, suggestion, auth and health endpoints
//! - [`server`]: router assembly, middleware and graceful shutdown
//! - [`error`]: error type and its HTTP mapping

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{AppConfig, ServerConfig};
pub use error::{Error, Result};
pub use server::{app, Server};
pub use state::AppState;

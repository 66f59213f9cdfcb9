//! Exact-match HTTP request dispatcher.
//!
//! Handlers are registered on a [`Router`] under an exact (method, path)
//! pair. [`HttpServer`] serves the frozen router: every request is turned
//! into a [`Context`] and dispatched; unmatched requests get
//! `404 NOT FOUND`.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{HttpServer, ServerError};
pub use lifecycle::Shutdown;
pub use routing::{Context, Handler, Router};

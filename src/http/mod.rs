//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum + hyper, HTTP/1.1 and HTTP/2)
//!     → tower-http layers (request ID, trace, timeout, body limit)
//!     → fallback: Context built from the request
//!     → routing::Router::dispatch
//!     → Context turned into the response
//! ```

pub mod server;

pub use server::{HttpServer, ServerError, BAD_REQUEST_BODY, PAYLOAD_TOO_LARGE_BODY};

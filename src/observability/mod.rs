//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router / HttpServer / config
//!     → tracing events with structured fields
//!     → logging.rs subscriber (text or JSON on stdout)
//!
//! Per request:
//!     tower-http TraceLayer span
//!     → x-request-id set and echoed back
//! ```

pub mod logging;

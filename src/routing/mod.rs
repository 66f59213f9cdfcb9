//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     add_route / get / post ...
//!     → key.rs (method + path → RouteKey)
//!     → router.rs (insert, last write wins)
//!
//! Per request:
//!     Context (method, path, headers, body)
//!     → router.rs (exact RouteKey lookup)
//!     → handler.rs (invoke) or fixed 404 response
//! ```
//!
//! # Design Decisions
//! - Exact string match only: no parameters, wildcards or prefixes
//! - Method is part of the key
//! - Immutable once shared with the server

pub mod context;
pub mod handler;
pub mod key;
pub mod router;

pub use context::Context;
pub use handler::Handler;
pub use key::RouteKey;
pub use router::{RouteError, Router, NOT_FOUND_BODY};

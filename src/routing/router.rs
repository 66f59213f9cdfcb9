//! Route registration and dispatch.
//!
//! # Responsibilities
//! - Store handlers under an exact (method, path) key
//! - Look up and invoke the handler for a request
//! - Write the fixed not-found response when nothing matches
//!
//! # Design Decisions
//! - Populated at startup through `&mut self`, then shared as `Arc<Router>`;
//!   dispatch only needs `&self`, so lookups take no locks
//! - `add_route` overwrites silently (last write wins); `try_add_route`
//!   rejects duplicates for callers that want uniqueness enforced
//! - An unmatched route is a normal outcome, not an error

use axum::http::{Method, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use super::context::Context;
use super::handler::Handler;
use super::key::RouteKey;

/// Body written for requests that match no route.
pub const NOT_FOUND_BODY: &str = "404 NOT FOUND";

/// Error returned by [`Router::try_add_route`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route already registered: {0}")]
    Duplicate(RouteKey),

    #[error("invalid method token: {0:?}")]
    InvalidMethod(String),

    #[error("invalid path {0:?}: must be non-empty and start with '/'")]
    InvalidPath(String),
}

/// Exact-match request router.
#[derive(Default)]
pub struct Router {
    routes: HashMap<RouteKey, Arc<dyn Handler>>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `method` and `path`.
    ///
    /// Re-registering the same pair replaces the previous handler.
    pub fn add_route<H: Handler>(&mut self, method: &str, path: &str, handler: H) -> &mut Self {
        let key = RouteKey::new(method, path);
        tracing::debug!(method = %method, path = %path, "Route registered");
        if self.routes.insert(key, Arc::new(handler)).is_some() {
            tracing::warn!(method = %method, path = %path, "Route replaced existing handler");
        }
        self
    }

    /// Register a handler, rejecting malformed input and duplicates.
    pub fn try_add_route<H: Handler>(
        &mut self,
        method: &str,
        path: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        if Method::from_bytes(method.as_bytes()).is_err() {
            return Err(RouteError::InvalidMethod(method.to_string()));
        }
        if !path.starts_with('/') {
            return Err(RouteError::InvalidPath(path.to_string()));
        }
        let key = RouteKey::new(method, path);
        if self.routes.contains_key(&key) {
            return Err(RouteError::Duplicate(key));
        }
        Ok(self.add_route(method, path, handler))
    }

    pub fn get<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route("GET", path, handler)
    }

    pub fn post<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route("POST", path, handler)
    }

    pub fn put<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route("PUT", path, handler)
    }

    pub fn delete<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route("DELETE", path, handler)
    }

    pub fn patch<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route("PATCH", path, handler)
    }

    pub fn head<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route("HEAD", path, handler)
    }

    pub fn options<H: Handler>(&mut self, path: &str, handler: H) -> &mut Self {
        self.add_route("OPTIONS", path, handler)
    }

    /// Whether a handler is registered for exactly this pair.
    pub fn contains(&self, method: &str, path: &str) -> bool {
        self.routes.contains_key(&RouteKey::new(method, path))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered keys, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteKey> {
        self.routes.keys()
    }

    /// Dispatch a request to its handler.
    ///
    /// Returns `true` if a handler ran. Otherwise the context holds the
    /// `404 NOT FOUND` response and `false` is returned.
    pub fn dispatch(&self, ctx: &mut Context) -> bool {
        let key = RouteKey::new(ctx.method(), ctx.path());
        match self.routes.get(&key) {
            Some(handler) => {
                handler.call(ctx);
                true
            }
            None => {
                ctx.string(StatusCode::NOT_FOUND, NOT_FOUND_BODY);
                false
            }
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the Axum app around a populated [`Router`]
//! - Wire up middleware (tracing, timeout, body limit, request ID)
//! - Bind the listener and serve until shutdown
//! - Turn every request into a [`Context`] and dispatch it

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, StatusCode},
    middleware::map_request,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::lifecycle::shutdown_signal;
use crate::routing::{Context, Router};

/// Body sent when a request body exceeds `limits.max_body_bytes`.
pub const PAYLOAD_TOO_LARGE_BODY: &str = "413 PAYLOAD TOO LARGE";

/// Body sent when the request body could not be read.
pub const BAD_REQUEST_BODY: &str = "400 BAD REQUEST";

const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Whether the client sent its own `x-request-id`.
#[derive(Debug, Clone, Copy)]
struct ClientRequestId(bool);

/// Error type for server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind the listen address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while serving.
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Application state injected into the dispatch handler.
#[derive(Clone)]
struct AppState {
    router: Arc<Router>,
}

/// HTTP server that dispatches every request through a [`Router`].
pub struct HttpServer {
    app: axum::Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a server. The router is frozen from here on.
    pub fn new(router: Router, config: ServerConfig) -> Self {
        for key in router.routes() {
            tracing::info!(method = %key.method(), path = %key.path(), "Route");
        }
        let state = AppState {
            router: Arc::new(router),
        };
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the Axum app with all middleware layers.
    ///
    /// Every request goes to the fallback so that the exact-match
    /// [`Router`] alone decides between a handler and `404`.
    fn build_app(config: &ServerConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .fallback(dispatch_request)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.timeouts.request_secs),
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(map_request(mark_client_request_id))
    }

    /// The Axum app, for serving it some other way or calling it in-process.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind `addr` and serve until Ctrl+C or SIGTERM.
    ///
    /// Only a bind failure or an I/O error while serving is returned.
    pub async fn run(self, addr: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already-bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.app.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record whether `x-request-id` came from the client, before one is generated.
async fn mark_client_request_id(mut request: Request<Body>) -> Request<Body> {
    let sent = request.headers().contains_key(X_REQUEST_ID);
    request.extensions_mut().insert(ClientRequestId(sent));
    request
}

/// Map a body collection failure to a response.
fn body_error_response(err: &axum::Error) -> Response {
    let mut source = std::error::Error::source(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return (StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE_BODY).into_response();
        }
        source = e.source();
    }
    (StatusCode::BAD_REQUEST, BAD_REQUEST_BODY).into_response()
}

/// Fallback handler: build a context, dispatch, respond.
async fn dispatch_request(State(state): State<AppState>, request: Request<Body>) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_request_id = request
        .extensions()
        .get::<ClientRequestId>()
        .is_some_and(|ClientRequestId(sent)| *sent);
    let (mut parts, body) = request.into_parts();

    // The body limit layer caps what can be collected here.
    let body = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "Failed to read request body");
            return body_error_response(&e);
        }
    };

    // Handlers see the headers the client sent; a generated id is only
    // echoed in the response.
    if !client_request_id {
        parts.headers.remove(X_REQUEST_ID);
    }

    let mut ctx = Context::new(parts.method.as_str(), parts.uri.path())
        .with_query(parts.uri.query().unwrap_or_default())
        .with_headers(parts.headers)
        .with_body(body);
    if let Some(peer) = peer {
        ctx = ctx.with_peer_addr(peer);
    }

    if !state.router.dispatch(&mut ctx) {
        tracing::debug!(method = %ctx.method(), path = %ctx.path(), "No route matched");
    }
    ctx.into_response()
}

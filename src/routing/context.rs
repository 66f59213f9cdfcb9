//! Per-request context handed to handlers.
//!
//! # Responsibilities
//! - Expose the request side (method, path, query, headers, body, peer)
//! - Collect the response side (status, headers, body) written by handlers
//! - Convert the finished context into an HTTP response
//!
//! The response starts as `200 OK` with no headers and an empty body.

use axum::body::Bytes;
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::net::SocketAddr;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const TEXT_HTML: &str = "text/html; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// Request/response context for a single dispatch.
#[derive(Debug)]
pub struct Context {
    method: String,
    path: String,
    query: String,
    headers: HeaderMap,
    body: Bytes,
    peer_addr: Option<SocketAddr>,

    status: StatusCode,
    response_headers: HeaderMap,
    response_body: Vec<u8>,
}

impl Context {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            query: String::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            peer_addr: None,
            status: StatusCode::OK,
            response_headers: HeaderMap::new(),
            response_body: Vec::new(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_peer_addr(mut self, peer_addr: SocketAddr) -> Self {
        self.peer_addr = Some(peer_addr);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw query string, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// First value of a query parameter, percent-decoded.
    pub fn query_param(&self, key: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Request header value, if present and valid visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    /// Set the response status code.
    pub fn status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Set a response header, replacing any previous value.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.response_headers.insert(name, value);
    }

    /// Append raw bytes to the response body.
    pub fn write(&mut self, bytes: &[u8]) {
        self.response_body.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write(s.as_bytes());
    }

    /// Respond with a plain-text body.
    pub fn string(&mut self, status: StatusCode, body: impl Into<String>) {
        self.status(status);
        self.set_header(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
        self.write_str(&body.into());
    }

    /// Respond with an HTML body.
    pub fn html(&mut self, status: StatusCode, body: impl Into<String>) {
        self.status(status);
        self.set_header(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_HTML));
        self.write_str(&body.into());
    }

    /// Respond with a JSON body.
    ///
    /// A value that fails to serialize turns into a `500` with the error text.
    pub fn json<T: Serialize + ?Sized>(&mut self, status: StatusCode, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => {
                self.status(status);
                self.set_header(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(APPLICATION_JSON),
                );
                self.write(&bytes);
            }
            Err(e) => {
                tracing::error!(path = %self.path, error = %e, "Failed to serialize JSON response");
                self.response_body.clear();
                self.string(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        }
    }

    pub fn response_status(&self) -> StatusCode {
        self.status
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    pub fn response_body(&self) -> &[u8] {
        &self.response_body
    }
}

impl IntoResponse for Context {
    /// Bodies written without a content type are sent as UTF-8 text.
    fn into_response(mut self) -> Response {
        self.response_headers
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(TEXT_PLAIN));
        (self.status, self.response_headers, self.response_body).into_response()
    }
}

//! Incoming request type — the gateway-proxied view of one HTTP call.

use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// An incoming request as the gateway hands it to the pipeline.
///
/// Immutable once constructed: wrappers read it and pass the same value down
/// the chain. The server builds one per invocation from the raw hyper
/// request; tests and embedders synthesize one with [`Request::builder`].
pub struct Request {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
    remote_addr: Option<String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        query: HashMap<String, String>,
        headers: HeaderMap,
        body: Bytes,
        remote_addr: Option<String>,
    ) -> Self {
        Self { method, path, query, headers, body, remote_addr }
    }

    /// Builder for synthesizing gateway-shaped requests. Defaults to
    /// `GET /` with no headers, no body, and no caller identity.
    pub fn builder() -> RequestBuilder {
        RequestBuilder {
            method: Method::GET,
            path: "/".to_owned(),
            query: HashMap::new(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            remote_addr: None,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Returns `None` for missing headers
    /// and for values that are not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a decoded query parameter: `/search?q=rust` → `Some("rust")`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// The caller's source network address, as the gateway reported it.
    ///
    /// `None` when the gateway supplied no identity metadata. The pipeline
    /// never fails over this — consumers log a sentinel instead.
    pub fn remote_addr(&self) -> Option<&str> {
        self.remote_addr.as_deref()
    }
}

// ── RequestBuilder ────────────────────────────────────────────────────────────

/// Fluent builder for [`Request`]. Obtain via [`Request::builder()`].
pub struct RequestBuilder {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
    remote_addr: Option<String>,
}

impl RequestBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// # Panics
    ///
    /// Panics if `name` or `value` is not a valid HTTP header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name = HeaderName::try_from(name)
            .unwrap_or_else(|e| panic!("invalid header name `{name}`: {e}"));
        let value = HeaderValue::try_from(value)
            .unwrap_or_else(|e| panic!("invalid header value for `{name}`: {e}"));
        self.headers.insert(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = Some(addr.into());
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body: self.body,
            remote_addr: self.remote_addr,
        }
    }
}

//! Outgoing HTTP response type and the [`IntoOutcome`] conversion trait.
//!
//! You should not need to think about this module directly. Build a [`Response`]
//! in your handler and return it. That is the entire job description.

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use http_body_util::Full;

use crate::error::Error;

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// Header keys are unique — setting a header twice keeps the last value.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use portico::Response;
///
/// Response::json(r#"{"id":1}"#);
/// Response::text("hello");
/// Response::empty(http::StatusCode::NO_CONTENT);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use http::StatusCode;
/// use portico::Response;
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .json(r#"{"id":42}"#);
/// ```
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    /// `200 OK` — `application/json`.
    ///
    /// Pass bytes from your serialiser directly — no intermediate allocation:
    /// - serde_json: `serde_json::to_vec(&val).unwrap()`
    /// - hand-built: `format!(r#"{{"id":{id}}}"#)`  ← zero-cost
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::bytes_raw("application/json", body.into())
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes_raw("text/plain; charset=utf-8", body.into().into())
    }

    /// Response with no body and no headers.
    pub fn empty(status: StatusCode) -> Self {
        Self { status, headers: HeaderMap::new(), body: Bytes::new() }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: HeaderMap::new(), status: StatusCode::OK }
    }

    pub fn status(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    fn bytes_raw(content_type: &'static str, body: Bytes) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        Self { status: StatusCode::OK, headers, body }
    }

    /// Hands the response to hyper. `Full` because portico responses are
    /// complete in memory — there is no streaming body to speak of.
    pub(crate) fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut out = http::Response::new(Full::new(self.body));
        *out.status_mut() = self.status;
        *out.headers_mut() = self.headers;
        out
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by a
/// typed body method — you always know what you're sending.
pub struct ResponseBuilder {
    headers: HeaderMap,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
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

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: impl Into<Bytes>) -> Response {
        self.finish("application/json", body.into())
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", body.into().into())
    }

    /// Terminate with no body (e.g. `204 No Content`).
    pub fn no_body(self) -> Response {
        Response { status: self.status, headers: self.headers, body: Bytes::new() }
    }

    fn finish(mut self, content_type: &'static str, body: Bytes) -> Response {
        self.headers
            .insert(http::header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        Response { status: self.status, headers: self.headers, body }
    }
}

// ── IntoOutcome ──────────────────────────────────────────────────────────────

/// Conversion into the pipeline outcome, `Result<Response, Error>`.
///
/// Lets a total handler stay honest about it — write it as
/// `async fn(Request) -> Response` and the pipeline wraps the result in `Ok`
/// for you. Fallible handlers return `Result<Response, Error>` directly.
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<Response, Error>;
}

impl IntoOutcome for Response {
    fn into_outcome(self) -> Result<Response, Error> {
        Ok(self)
    }
}

impl IntoOutcome for Result<Response, Error> {
    fn into_outcome(self) -> Result<Response, Error> {
        self
    }
}

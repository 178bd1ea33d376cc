//! Middleware composition — the request pipeline.
//!
//! A [`Middleware`] receives the rest of the pipeline as a capability and
//! returns a new layer with the same shape. It can run logic before
//! delegating, after delegating, or both — and it can short-circuit the chain
//! by never delegating at all (an auth rejection, say).
//!
//! [`Pipeline::builder`] composes wrappers outer-to-inner around a terminal
//! handler:
//!
//! ```text
//! Pipeline::builder().wrap(w1).wrap(w2).handler(h)   →   w1(w2(h))
//! ```
//!
//! Pre-delegation logic runs in registration order, post-delegation logic in
//! reverse — standard nested-call semantics. The composed [`Pipeline`] is the
//! one callable the server invokes per request; it holds no mutable state, so
//! concurrent invocations need no coordination.

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

// ── Middleware ───────────────────────────────────────────────────────────────

/// A cross-cutting wrapper layered around the rest of the pipeline.
///
/// `wrap` is called once, at composition time. The returned handler is what
/// runs per request — construct it with everything it needs up front.
///
/// ```rust
/// use std::sync::Arc;
/// use portico::{BoxFuture, BoxedHandler, ErasedHandler, Middleware, Request};
///
/// struct Reject;
///
/// impl Middleware for Reject {
///     fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
///         Arc::new(RejectHandler { next })
///     }
/// }
///
/// struct RejectHandler {
///     next: BoxedHandler,
/// }
///
/// impl ErasedHandler for RejectHandler {
///     fn call(&self, req: Request) -> BoxFuture {
///         let next = Arc::clone(&self.next);
///         Box::pin(async move {
///             // inspect `req`, then delegate — or don't
///             next.call(req).await
///         })
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    /// Wraps the rest of the pipeline, returning the new outer edge.
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

// ── Pipeline ─────────────────────────────────────────────────────────────────

/// The composed pipeline: wrappers and a terminal handler fused into one
/// callable.
///
/// Cheap to clone — one `Arc` bump — so the server hands a copy to every
/// connection task.
#[derive(Clone)]
pub struct Pipeline {
    inner: BoxedHandler,
}

impl Pipeline {
    /// Starts a pipeline with no wrappers registered yet.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder { wrappers: Vec::new() }
    }

    /// Composes a bare handler — no wrappers.
    pub fn new(handler: impl Handler) -> Self {
        Self::builder().handler(handler)
    }

    /// Runs one request through every wrapper and the terminal handler.
    pub async fn handle(&self, req: Request) -> Result<Response, Error> {
        self.inner.call(req).await
    }
}

// ── PipelineBuilder ──────────────────────────────────────────────────────────

/// Fluent builder for [`Pipeline`]. Obtain via [`Pipeline::builder()`].
pub struct PipelineBuilder {
    wrappers: Vec<Box<dyn Middleware>>,
}

impl PipelineBuilder {
    /// Registers a wrapper. Outer-to-inner: the first registration becomes
    /// the outermost layer.
    pub fn wrap(mut self, middleware: impl Middleware) -> Self {
        self.wrappers.push(Box::new(middleware));
        self
    }

    /// Seals the pipeline with its terminal handler.
    pub fn handler(self, terminal: impl Handler) -> Pipeline {
        // Fold innermost-first so registration order reads outer-to-inner.
        let mut composed = terminal.into_boxed_handler();
        for wrapper in self.wrappers.iter().rev() {
            composed = wrapper.wrap(composed);
        }
        Pipeline { inner: composed }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

//! Access logging — one line per invocation with the caller's address.

use std::sync::Arc;

use tracing::info;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::pipeline::Middleware;
use crate::request::Request;

/// Logs the caller's source address once per invocation.
///
/// Delegates first, logs second — the emitted line carries the outcome it
/// observed, whether the inner call succeeded or failed. A pure observer: the
/// outcome is returned untouched. A request without identity metadata is
/// logged with a `-` sentinel rather than failed.
///
/// Lines go through the process-wide [`tracing`] dispatcher; install a
/// subscriber at startup (see `demos/app.rs`). If no subscriber is installed
/// the lines are dropped, which is accepted — logging never becomes a
/// pipeline error.
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessLog;

impl AccessLog {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for AccessLog {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        Arc::new(AccessLogHandler { next })
    }
}

struct AccessLogHandler {
    next: BoxedHandler,
}

impl ErasedHandler for AccessLogHandler {
    fn call(&self, req: Request) -> BoxFuture {
        let next = Arc::clone(&self.next);
        Box::pin(async move {
            // The request moves into the rest of the chain; keep the identity.
            let identity = req.remote_addr().map(str::to_owned);
            let outcome = next.call(req).await;

            let remote_addr = identity.as_deref().unwrap_or("-");
            match &outcome {
                Ok(response) => {
                    info!(remote_addr, status = response.status().as_u16(), "request handled");
                }
                Err(error) => {
                    info!(remote_addr, %error, "request failed");
                }
            }

            outcome
        })
    }
}

//! HTTP server and graceful shutdown — the hosting side of the pipeline.
//!
//! The server plays the gateway's role: it owns invocation lifetime, spawns
//! one task per connection, and invokes the composed [`Pipeline`] once per
//! request. The pipeline never sees raw hyper types — the server materializes
//! a [`Request`] (including the caller's identity) on the way in and
//! translates the outcome back to wire HTTP on the way out.
//!
//! # Caller identity
//!
//! portico services sit behind a reverse proxy or gateway, so the socket peer
//! is usually the proxy, not the caller. Identity resolution prefers the
//! first `x-forwarded-for` entry and falls back to the socket address.
//!
//! # Graceful shutdown and Kubernetes
//!
//! When Kubernetes terminates a pod it sends **SIGTERM** and waits
//! `terminationGracePeriodSeconds` (default 30 s) before sending SIGKILL.
//!
//! The server reacts by:
//! 1. Immediately stopping `listener.accept()` — no new connections are made.
//! 2. Letting every in-flight connection task run to completion.
//! 3. Returning from [`Server::serve`], which lets `main` exit cleanly.

use std::collections::HashMap;
use std::net::SocketAddr;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::Error;
use crate::pipeline::Pipeline;
use crate::request::Request;
use crate::response::Response;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if `addr` is not a valid `host:port` string.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use portico::Server;
    /// let server = Server::bind("0.0.0.0:3000");
    /// ```
    pub fn bind(addr: &str) -> Self {
        let addr: SocketAddr = addr.parse().expect("invalid socket address");
        Self { addr }
    }

    /// Starts accepting connections and running them through `pipeline`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, pipeline: Pipeline) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;

        info!(addr = %self.addr, "portico listening");

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        // Pin the shutdown future so we can poll it in a loop.
        // Futures in Rust must not move in memory after the first poll — that
        // is what `Pin` enforces. `tokio::pin!` pins the future on the stack.
        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // `biased` makes select! check arms top-to-bottom instead of
                // randomly. We check shutdown first so a SIGTERM immediately
                // stops accepting new connections, even if more are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    // A pipeline clone is one atomic increment — every
                    // connection task gets its own handle.
                    let pipeline = pipeline.clone();
                    // TokioIo adapts tokio's AsyncRead/AsyncWrite to the hyper
                    // IO traits.
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // `service_fn` turns a plain async function into a
                        // hyper `Service`. The closure is called once per
                        // request on the connection, not once per connection.
                        let svc = service_fn(move |req| {
                            let pipeline = pipeline.clone();
                            async move { dispatch(pipeline, req, remote_addr).await }
                        });

                        // `auto::Builder` transparently handles both HTTP/1.1
                        // and HTTP/2 — whatever the client negotiates.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        // Drain: wait for every in-flight connection to finish before we return.
        while tasks.join_next().await.is_some() {}

        info!("portico stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Core hot path: materializes one request, runs the pipeline, produces one
/// response.
///
/// The error type is [`Infallible`](std::convert::Infallible) — we handle all
/// failures internally (returning 400, 500) so hyper never sees an error.
async fn dispatch(
    pipeline: Pipeline,
    req: hyper::Request<hyper::body::Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, std::convert::Infallible> {
    let request = match read_request(req, remote_addr).await {
        Ok(r) => r,
        Err(e) => {
            error!(peer = %remote_addr, "failed to read request body: {e}");
            return Ok(Response::empty(StatusCode::BAD_REQUEST).into_http());
        }
    };

    Ok(into_http(pipeline.handle(request).await))
}

/// Collects the body and assembles the gateway-shaped [`Request`].
async fn read_request(
    req: hyper::Request<hyper::body::Incoming>,
    remote_addr: SocketAddr,
) -> Result<Request, hyper::Error> {
    let (parts, body) = req.into_parts();
    let body = body.collect().await?.to_bytes();

    let path = parts.uri.path().to_owned();
    let query = parts
        .uri
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_else(HashMap::new);
    let caller = client_addr(&parts.headers, remote_addr);

    Ok(Request::new(parts.method, path, query, parts.headers, body, Some(caller)))
}

/// Resolves the caller's address: first `x-forwarded-for` entry, then the
/// socket peer.
fn client_addr(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| peer.ip().to_string())
}

/// Boundary translation: pipeline errors become `500` with an empty body.
/// The error itself goes to the log, never onto the wire.
fn into_http(outcome: Result<Response, Error>) -> http::Response<Full<Bytes>> {
    match outcome {
        Ok(response) => response.into_http(),
        Err(error) => {
            error!(%error, "pipeline error");
            Response::empty(StatusCode::INTERNAL_SERVER_ERROR).into_http()
        }
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** (sent by `kubectl` and the
/// Kubernetes control plane) and **SIGINT** (Ctrl-C, for local dev).
/// On Windows only Ctrl-C is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // `pending()` is a future that never resolves — on non-Unix platforms
    // the SIGTERM arm is effectively disabled.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

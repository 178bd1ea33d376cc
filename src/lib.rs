//! # portico
//!
//! A minimal HTTP request pipeline for single-handler services behind an API
//! gateway. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! The gateway handles TLS, routing, rate limiting, slow clients, and
//! body-size limits. portico does not — by design. The gateway does gateway
//! things. The pipeline does pipeline things. What's left is the only part
//! that changes between applications:
//!
//! - **Composition** — cross-cutting wrappers (logging, auth, metrics)
//!   layered around one terminal handler, fused into a single callable
//! - **Async I/O** — tokio + hyper, HTTP/1.1 and HTTP/2
//! - **Graceful shutdown** — SIGTERM / Ctrl-C, drains in-flight requests
//!
//! One invocation per request, no shared mutable state between invocations,
//! no routing table: every request reaches the same pipeline.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use portico::middleware::AccessLog;
//! use portico::{Pipeline, Request, Response, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = Pipeline::builder()
//!         .wrap(AccessLog::new())
//!         .handler(handle);
//!
//!     Server::bind("0.0.0.0:3000").serve(pipeline).await.unwrap();
//! }
//!
//! async fn handle(_req: Request) -> Response {
//!     // portico sends bytes — it doesn't care how you build them:
//!     //   serde_json::to_vec(&value).unwrap()
//!     //   format!(r#"{{"id":"{id}"}}"#)
//!     Response::json(r#"{"hello":"world"}"#)
//! }
//! ```

mod error;
mod handler;
mod pipeline;
mod request;
mod response;
mod server;

pub mod app;
pub mod middleware;

pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
pub use pipeline::{Middleware, Pipeline, PipelineBuilder};
pub use request::{Request, RequestBuilder};
pub use response::{IntoOutcome, Response, ResponseBuilder};
pub use server::Server;

//! Built-in middleware.
//!
//! Cross-cutting concerns layered around the terminal handler: this is the
//! right place for access logging, metrics, request-id injection, and
//! authentication-header inspection. Each built-in is a
//! [`Middleware`](crate::Middleware) impl; register them on the pipeline
//! builder outer-to-inner.
//!
//! Currently ships [`AccessLog`]. Auth, metrics, and rate limiting slot in as
//! further impls without touching the pipeline itself.

mod log;

pub use log::AccessLog;

//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The pipeline needs to hold wrappers and handlers of *different* concrete
//! types behind one interface, so we use **trait objects** (`dyn
//! ErasedHandler`) to hide the concrete type and store everything uniformly.
//!
//! The chain from user code to vtable call is:
//!
//! ```text
//! async fn app(req: Request) -> Response { … }     ← user writes this
//!        ↓ Pipeline::builder().handler(app)
//! app.into_boxed_handler()                         ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(app))                         ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req)  at request time               ← one vtable dispatch
//!        ↓
//! Box::pin(async { app(req).await.into_outcome() })  ← BoxFuture
//! ```
//!
//! The only runtime cost per request is **one Arc clone** (atomic inc) +
//! **one virtual call per layer** — negligible compared to network I/O.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;
use crate::response::{IntoOutcome, Response};

// ── Erased types ─────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to the pipeline outcome.
///
/// `Pin<Box<…>>` is required because the async runtime must be able to poll
/// the future in-place — it cannot move it in memory after the first poll.
/// `Send + 'static` let tokio move the future across threads safely.
pub type BoxFuture = Pin<Box<dyn Future<Output = Result<Response, Error>> + Send + 'static>>;

/// The single-method capability every layer of the pipeline exposes.
///
/// Wrappers receive the rest of the pipeline as a `BoxedHandler` and produce
/// one of these themselves — see [`Middleware`](crate::Middleware).
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
///
/// `Arc` gives us cheap, thread-safe shared ownership (one atomic reference
/// count increment per request) without copying the handler.
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid terminal handler.
///
/// You never implement this yourself. It is automatically satisfied for any
/// `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request) -> Response                  // total
/// async fn name(req: Request) -> Result<Response, Error>   // fallible
/// ```
///
/// The trait is **sealed** (via the private `Sealed` supertrait): only the
/// blanket impl below can satisfy it. This prevents accidental misuse and
/// keeps the API surface stable across versions.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

/// The sealing module. Because `Sealed` is private, external crates cannot
/// name it and therefore cannot implement `Handler` on their own types.
mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

/// Implement the sealing trait for any function with the right signature.
///
/// `Fn(Request) -> Fut` covers:
///   - named `async fn` items
///   - `async` closures
///   - any struct that implements `Fn`
impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
}

/// Implement `Handler` for any function with the right signature.
impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        // Call the wrapped function — this returns the concrete `Fut`.
        // We then map it to the outcome type via `IntoOutcome` and box the
        // whole thing so the return type matches the trait signature.
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_outcome() })
    }
}

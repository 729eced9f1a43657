//! Handler trait and type erasure.
//!
//! # How async handlers are stored
//!
//! The router holds handlers of *different* types in a single
//! `HashMap<Method, Tree>`. Rust collections can only hold one concrete type,
//! so handlers are hidden behind a trait object (`dyn ErasedHandler`) and
//! stored uniformly.
//!
//! ```text
//! async fn get_user(req: Request) -> Outcome { … }   ← user writes this
//!        ↓ router.get("/users/{id}", get_user)
//! get_user.into_boxed_handler()                    ← Handler blanket impl
//!        ↓
//! Arc::new(FnHandler(get_user))                    ← heap-allocated wrapper
//!        ↓  stored as BoxedHandler = Arc<dyn ErasedHandler>
//! handler.call(req)  at request time               ← one vtable dispatch
//!        ↓
//! Box::pin(async { get_user(req).await.into_outcome() })  ← BoxFuture
//! ```
//!
//! The same [`BoxFuture`] is what every [`Middleware`](crate::middleware::Middleware)
//! stage returns, so a handler is simply the last stage of the chain.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::Fault;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

// ── Outcome ───────────────────────────────────────────────────────────────────

/// What every stage of the pipeline yields: a response, or a [`Fault`] that
/// an outer stage may translate.
pub type Outcome = Result<Response, Fault>;

/// A heap-allocated, type-erased future that resolves to an [`Outcome`].
///
/// `Pin<Box<…>>` lets the runtime poll the future in place; `Send + 'static`
/// lets tokio move it across worker threads.
pub type BoxFuture = Pin<Box<dyn Future<Output = Outcome> + Send + 'static>>;

/// Conversion of a handler's return value into an [`Outcome`].
///
/// Implemented for [`Response`], [`Status`], and `Result<T, Fault>` where
/// `T: IntoResponse`, so handlers can use `?` on anything that converts into
/// a [`Fault`].
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Response {
    fn into_outcome(self) -> Outcome { Ok(self) }
}

impl IntoOutcome for Status {
    fn into_outcome(self) -> Outcome { Ok(self.into_response()) }
}

impl<T: IntoResponse> IntoOutcome for Result<T, Fault> {
    fn into_outcome(self) -> Outcome { self.map(IntoResponse::into_response) }
}

// ── Internal types ────────────────────────────────────────────────────────────

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself. It is satisfied for any function or
/// closure with the shape:
///
/// ```text
/// Fn(Request) -> impl Future<Output = impl IntoOutcome>
/// ```
///
/// The trait is **sealed**: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
}

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

/// Newtype bridging a concrete handler `F` to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoOutcome + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_outcome() })
    }
}

//! Middleware layer.
//!
//! A middleware wraps the rest of the pipeline. It receives the request and a
//! [`Next`] handle; calling [`Next::run`] invokes every inner stage and finally
//! the route handler, and yields the [`Outcome`] flowing back out.
//!
//! ```text
//!   request ─▶ ErrorTranslator ─▶ RequireAuthorization ─▶ RequestLogger ─▶ handler
//!   outcome ◀─       ▲                    │ 401                  ▲            │
//!                    └────── fault ───────┴──────────────────────┴────────────┘
//! ```
//!
//! Layers are registered on the [`Router`](crate::Router) with
//! [`layer`](crate::Router::layer); the first one registered is the
//! outermost. A stage may short-circuit by returning without calling `next`.

mod auth;
mod log;
mod recover;

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

pub use auth::RequireAuthorization;
pub use log::RequestLogger;
pub use recover::ErrorTranslator;

/// A request interceptor.
///
/// The returned future must be `'static`, so implementations move whatever
/// they need out of `self` (usually nothing) into an `async move` block:
///
/// ```rust
/// use userbase::middleware::{Middleware, Next};
/// use userbase::{BoxFuture, Request};
///
/// struct Noop;
///
/// impl Middleware for Noop {
///     fn handle(&self, req: Request, next: Next) -> BoxFuture {
///         Box::pin(async move { next.run(req).await })
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type SharedMiddleware = Arc<dyn Middleware>;

/// The remainder of the pipeline after the current stage.
pub struct Next {
    chain: Arc<[SharedMiddleware]>,
    index: usize,
    endpoint: BoxedHandler,
}

impl Next {
    pub(crate) fn new(chain: Arc<[SharedMiddleware]>, endpoint: BoxedHandler) -> Self {
        Self { chain, index: 0, endpoint }
    }

    /// Runs the next stage: the following middleware, or the endpoint once
    /// the chain is exhausted.
    pub fn run(self, req: Request) -> BoxFuture {
        let stage = self.chain.get(self.index).cloned();
        match stage {
            Some(stage) => stage.handle(req, Next { index: self.index + 1, ..self }),
            None => self.endpoint.call(req),
        }
    }
}

/// `{"error": message}` with the given status.
pub(crate) fn error_response(status: Status, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::builder().status(status).json(body.into_bytes())
}

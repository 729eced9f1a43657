//! Fault-to-JSON translation.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use tracing::error;

use super::{error_response, Middleware, Next};
use crate::error::Fault;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::status::Status;

/// Converts any [`Fault`] from the inner pipeline, or a panic raised while
/// polling it, into `500` with body `{"error": "<message>"}`.
///
/// Register it first so it wraps every other stage. The raw fault message is
/// exposed to the client; nothing else (no backtrace) is.
pub struct ErrorTranslator;

impl Middleware for ErrorTranslator {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin(async move {
            // `run` is called inside the guarded future: an eager handler can
            // panic before it returns its future.
            let inner = AssertUnwindSafe(async move { next.run(req).await });
            let fault = match inner.catch_unwind().await {
                Ok(Ok(res)) => return Ok(res),
                Ok(Err(fault)) => fault,
                Err(payload) => Fault::Panic(panic_message(payload.as_ref())),
            };
            error!(error = %fault, "unhandled fault");
            Ok(error_response(Status::InternalServerError, &fault.to_string()))
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_owned()
    }
}

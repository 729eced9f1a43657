//! Authorization-header presence gate.

use tracing::warn;

use super::{error_response, Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::status::Status;

const MISSING: &str = "Unauthorized: Missing or empty Authorization header.";

/// Rejects requests whose `Authorization` header is absent or blank with
/// `401` and a JSON error body.
///
/// Presence only: the value is never parsed or verified, and no identity is
/// attached to the request.
pub struct RequireAuthorization;

impl Middleware for RequireAuthorization {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin(async move {
            let present = req.header("authorization")
                .is_some_and(|v| !v.trim().is_empty());
            if !present {
                warn!(method = %req.method(), path = req.path(), "rejected: no authorization header");
                return Ok(error_response(Status::Unauthorized, MISSING));
            }
            next.run(req).await
        })
    }
}

//! Request/response exchange logging.

use std::time::Instant;

use tracing::{info, warn};

use super::{Middleware, Next};
use crate::handler::BoxFuture;
use crate::request::Request;

/// Logs the method, path and body of every request, then the status and
/// body of the response it produced.
///
/// Both bodies are already buffered (see [`Request`] and
/// [`Response`](crate::Response)), so logging reads them in place and the
/// handler and client see the same bytes.
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin(async move {
            let method = req.method();
            let path = req.path().to_owned();
            info!(
                %method,
                path = %path,
                body = %String::from_utf8_lossy(req.body()),
                "request"
            );

            let started = Instant::now();
            let outcome = next.run(req).await;
            let latency_us = started.elapsed().as_micros() as u64;

            match &outcome {
                Ok(res) => info!(
                    %method,
                    path = %path,
                    status = res.code(),
                    latency_us,
                    body = %String::from_utf8_lossy(res.body()),
                    "response"
                ),
                Err(fault) => warn!(%method, path = %path, latency_us, error = %fault, "handler fault"),
            }
            outcome
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::handler::Handler;
    use crate::method::Method;
    use crate::middleware::SharedMiddleware;
    use crate::response::Response;
    use crate::status::Status;

    async fn echo(req: Request) -> Response {
        Response::builder()
            .status(Status::Created)
            .json(req.body().to_vec())
    }

    #[tokio::test]
    async fn bodies_pass_through_unchanged() {
        let chain: Arc<[SharedMiddleware]> = Arc::from(vec![
            Arc::new(RequestLogger) as SharedMiddleware,
        ]);
        let payload = r#"{"Email":"a@b.com","Name":"Ann"}"#;
        let req = Request::builder(Method::Post, "/users").body(payload).build();

        let res = Next::new(chain, echo.into_boxed_handler()).run(req).await.unwrap();

        assert_eq!(res.code(), 201);
        assert_eq!(res.body(), payload.as_bytes());
    }
}

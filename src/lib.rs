//! # userbase
//!
//! A minimal HTTP service for creating, reading, updating and deleting
//! users held in process memory.
//!
//! ## The pipeline
//!
//! Every request passes through three middleware stages before it reaches a
//! route handler, and the response flows back out through the same stages:
//!
//! 1. [`ErrorTranslator`](middleware::ErrorTranslator) — any fault or panic
//!    below it becomes `500 {"error": "<message>"}`.
//! 2. [`RequireAuthorization`](middleware::RequireAuthorization) — a missing
//!    or blank `Authorization` header is answered with `401`.
//! 3. [`RequestLogger`](middleware::RequestLogger) — logs method, path and
//!    body on the way in, status and body on the way out.
//!
//! Handlers validate payloads ([`validate`]) and talk to the shared
//! [`UserStore`], which serialises every operation behind one lock.
//!
//! What userbase does not do: persistence, pagination, search, token
//! verification, rate limiting.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use userbase::{app, Server, UserStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let router = app(Arc::new(UserStore::new()));
//!     Server::bind("0.0.0.0:3000".parse().unwrap())
//!         .serve(router)
//!         .await
//!         .unwrap();
//! }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod routes;
mod server;
mod status;
mod store;
mod user;
mod validate;

pub mod middleware;

pub use config::Config;
pub use error::{Error, Fault};
pub use handler::{BoxFuture, Handler, IntoOutcome, Outcome};
pub use method::Method;
pub use request::{Request, RequestBuilder};
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use routes::app;
pub use server::{serve_listener, Server, DEFAULT_MAX_BODY_BYTES};
pub use status::Status;
pub use store::UserStore;
pub use user::{User, UserId, UserPayload};
pub use validate::validate;

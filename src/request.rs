//! Incoming HTTP request type.
//!
//! The body is collected into [`Bytes`] once, at the transport boundary.
//! Every stage of the pipeline reads the same buffer through
//! [`Request::body`], so logging it never starves the handler.

use std::collections::HashMap;

use bytes::Bytes;

use crate::method::Method;

/// An incoming HTTP request with a fully buffered body.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: Vec<(String, String)>,
        body: Bytes,
    ) -> Self {
        Self { method, path, headers, body, params: HashMap::new() }
    }

    /// Builder for requests constructed in-process, e.g. to drive a
    /// [`Router`](crate::Router) directly in tests.
    ///
    /// ```rust
    /// use userbase::{Method, Request};
    ///
    /// let req = Request::builder(Method::Post, "/users")
    ///     .header("authorization", "Bearer x")
    ///     .body(r#"{"Email":"a@b.com","Name":"Ann"}"#)
    ///     .build();
    /// assert_eq!(req.header("Authorization"), Some("Bearer x"));
    /// ```
    pub fn builder(method: Method, path: &str) -> RequestBuilder {
        RequestBuilder {
            method,
            path: path.to_owned(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Fluent builder for [`Request`]. Obtain via [`Request::builder`].
pub struct RequestBuilder {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Bytes,
}

impl RequestBuilder {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Request {
        Request::new(self.method, self.path, self.headers, self.body)
    }
}

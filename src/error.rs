//! Error types.
//!
//! Two kinds of failure exist and they never mix:
//!
//! - [`Error`] — infrastructure failures: resolving the listen address,
//!   binding the port, accepting a connection. Returned from
//!   [`Server::serve`](crate::Server::serve).
//! - [`Fault`] — an unexpected failure while producing a response. Handlers
//!   and middleware return it through [`Outcome`](crate::Outcome); the
//!   [`ErrorTranslator`](crate::middleware::ErrorTranslator) turns it into a
//!   `500` JSON body.
//!
//! Expected application outcomes (400, 401, 404) are plain
//! [`Response`](crate::Response) values, not errors.

use thiserror::Error;

/// The error type returned by userbase's fallible startup operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{0}`")]
    Addr(String),
}

/// An unexpected failure raised while handling a request.
#[derive(Debug, Error)]
pub enum Fault {
    /// Serialising a response body failed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// A handler panicked; carries the panic message.
    #[error("{0}")]
    Panic(String),

    #[error("{0}")]
    Other(String),
}

impl Fault {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_displays_raw_message() {
        assert_eq!(Fault::msg("disk on fire").to_string(), "disk on fire");
        assert_eq!(Fault::Panic("boom".into()).to_string(), "boom");
    }

    #[test]
    fn io_error_is_prefixed() {
        let err = Error::from(std::io::Error::other("refused"));
        assert_eq!(err.to_string(), "io: refused");
    }
}

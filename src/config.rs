//! Runtime configuration.
//!
//! Every setting is a command-line flag with an environment-variable
//! fallback, so the same binary runs unchanged locally and in a container.

use std::net::{SocketAddr, ToSocketAddrs};

use clap::Parser;

use crate::error::Error;
use crate::server::DEFAULT_MAX_BODY_BYTES;

/// Service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "userbase", version, about = "In-memory user CRUD service")]
pub struct Config {
    /// Host or IP address to bind to.
    #[arg(long, env = "USERBASE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to.
    #[arg(long, env = "USERBASE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Largest request body accepted, in bytes; larger bodies get `413`.
    #[arg(long, env = "USERBASE_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// `tracing` filter directive, e.g. `info` or `userbase=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log: "info".to_owned(),
        }
    }
}

impl Config {
    /// Resolves `host:port` to the first matching socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let target = format!("{}:{}", self.host, self.port);
        target.to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or(Error::Addr(target))
    }
}

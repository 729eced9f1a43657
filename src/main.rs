//! `userbase` binary.
//!
//! ```text
//! USERBASE_PORT=3000 RUST_LOG=info userbase
//!
//! curl -X POST localhost:3000/users -H 'authorization: x' \
//!      -d '{"Email":"a@b.com","Name":"Ann"}'
//! curl localhost:3000/users/1 -H 'authorization: x'
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use userbase::{app, Config, Error, Server, UserStore};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log))
        .init();

    let addr = config.socket_addr()?;
    let router = app(Arc::new(UserStore::new()));

    Server::bind(addr)
        .max_body_bytes(config.max_body_bytes)
        .serve(router)
        .await
}

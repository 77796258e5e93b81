//! Templyk API server binary.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::net::SocketAddr;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = templyk_core::Config::from_env()?;
    let addr: SocketAddr = ([0, 0, 0, 0], 8000).into();
    templyk_api::Server::new(config)?.serve(addr).await?;

    Ok(())
}

//! Binary crate for the `weatherbot` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging bootstrap
//! - Starting the HTTP service or answering a single query

use clap::Parser;

mod cli;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    logging::init(cmd.verbose)?;
    cmd.run().await
}

//! Contact service binary
//!
//! # Usage
//!
//! ```bash
//! contact-api serve --port 3000
//! contact-api ping
//! ```
//!
//! See [`contact_api::cli`] for flags, environment variables and exit codes.

use clap::Parser;
use contact_api::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    contact_api::run(cli).await
}

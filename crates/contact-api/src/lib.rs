//! Contact Service
//!
//! HTTP service behind a portfolio site's contact form. Each accepted
//! submission becomes one document in the `contacts` collection.
//!
//! ## Architecture
//!
//! 1. **Handler** (`handler/`): axum routes, request logging and response
//!    bodies.
//!
//! 2. **Config** (`config`): TOML file layered under flags and environment.
//!
//! 3. **Telemetry** (`telemetry/`): `tracing` subscriber setup and Prometheus
//!    submission metrics.
//!
//! 4. **CLI** (`cli/`): `serve` and `ping` subcommands.
//!
//! Validation and persistence live in `contact-core` and `contact-storage`.
//!
//! ## Endpoint
//!
//! ```text
//! POST /api/contact  {"name","email","subject","message"}
//!   201 {"message":"Message sent successfully"}
//!   400 {"error":"Missing required fields"}
//!   500 {"error":"Internal Server Error"}
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use contact_api::{build_app, ServiceConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::from_toml("[store]\nbackend = \"memory\"")?;
//! let app = build_app(&config)?;
//! let listener = tokio::net::TcpListener::bind(config.socket_addr()?).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod server;
pub mod telemetry;

pub use cli::{run, Cli};
pub use config::{ConfigError, ServiceConfig};
pub use error::ApiError;
pub use handler::{create_router, AppState};
pub use server::{build_app, serve};
pub use telemetry::ContactMetrics;

/// Service version reported by `/health`
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

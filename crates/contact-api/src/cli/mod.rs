//! Command-line interface for the contact service
//!
//! ```bash
//! # Run the HTTP server against MongoDB
//! MONGODB_URI=mongodb://localhost:27017/portfolio contact-api serve --port 3000
//!
//! # Run with the in-memory store
//! contact-api serve --store memory --plain-logs
//!
//! # Check that the configured store is reachable
//! contact-api ping --config contact.toml
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Store unreachable (`ping`)
//! - 2: Invalid configuration

use clap::{Args, Parser, Subcommand};
use contact_storage::StoreBackend;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{ConfigError, ServiceConfig};
use crate::telemetry::init_tracing;

/// Portfolio contact service
#[derive(Parser, Debug)]
#[command(name = "contact-api")]
#[command(about = "Contact form submission service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Connect to the configured store once and report the result
    Ping {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Configuration sources shared by all subcommands
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// Path to a TOML config file
    #[arg(short, long, env = "CONTACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, env = "CONTACT_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Store backend (mongodb or memory)
    #[arg(long, env = "CONTACT_STORE")]
    pub store: Option<StoreBackend>,

    /// MongoDB connection string
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    /// MongoDB database (defaults to the one in the URI)
    #[arg(long, env = "MONGODB_DATABASE")]
    pub mongodb_database: Option<String>,

    /// MongoDB collection
    #[arg(long, env = "MONGODB_COLLECTION")]
    pub mongodb_collection: Option<String>,

    /// Origin allowed to submit cross-site
    #[arg(long, env = "CORS_ALLOW_ORIGIN")]
    pub cors_allow_origin: Option<String>,

    /// Human-readable logs instead of JSON
    #[arg(long)]
    pub plain_logs: bool,
}

impl ConfigArgs {
    /// Resolve file, flags and environment into a validated config
    pub fn load(&self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply(&self, config: &mut ServiceConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(backend) = self.store {
            config.store.backend = backend;
        }
        if let Some(uri) = &self.mongodb_uri {
            config.store.mongo.uri = uri.clone();
        }
        if let Some(database) = &self.mongodb_database {
            config.store.mongo.database = Some(database.clone());
        }
        if let Some(collection) = &self.mongodb_collection {
            config.store.mongo.collection = collection.clone();
        }
        if let Some(origin) = &self.cors_allow_origin {
            config.cors_allow_origin = Some(origin.clone());
        }
        if self.plain_logs {
            config.log_json = false;
        }
    }
}

/// Run the CLI and return the process exit code
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let (args, serve) = match &cli.command {
        Commands::Serve { config } => (config, true),
        Commands::Ping { config } => (config, false),
    };

    let config = match args.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    init_tracing(config.log_json)?;

    if serve {
        crate::server::serve(config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    Ok(if ping(&config).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Connect once and print the outcome as a JSON line
async fn ping(config: &ServiceConfig) -> bool {
    let store = config.store.build();
    let result = store.connect().await;

    println!(
        "{}",
        serde_json::json!({
            "backend": store.backend(),
            "connected": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        })
    );

    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from([
            "contact-api",
            "serve",
            "--port",
            "8080",
            "--store",
            "memory",
            "--plain-logs",
        ])
        .unwrap();

        let Commands::Serve { config } = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.store, Some(StoreBackend::Memory));
        assert!(config.plain_logs);
    }

    #[test]
    fn test_rejects_unknown_backend() {
        assert!(Cli::try_parse_from(["contact-api", "ping", "--store", "redis"]).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
port = 4000

[store]
backend = "mongodb"
uri = "mongodb://file-host:27017"
collection = "from_file"
"#
        )
        .unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            port: Some(5000),
            mongodb_collection: Some("from_flag".to_string()),
            ..Default::default()
        };
        let config = args.load().unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.store.mongo.uri, "mongodb://file-host:27017");
        assert_eq!(config.store.mongo.collection, "from_flag");
        assert!(config.log_json);
    }

    #[test]
    fn test_missing_config_file() {
        let args = ConfigArgs {
            config: Some(PathBuf::from("/nonexistent/contact.toml")),
            ..Default::default()
        };
        assert!(matches!(args.load(), Err(ConfigError::Read { .. })));
    }

    #[tokio::test]
    async fn test_ping_memory_store() {
        let mut config = ServiceConfig::default();
        config.store.backend = StoreBackend::Memory;
        assert!(ping(&config).await);
    }
}

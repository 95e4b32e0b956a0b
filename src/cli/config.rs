//! Configuration

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::{cli::Command, store::DEFAULT_CART_KEY};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Stampcart configuration
#[derive(Debug, Parser)]
#[command(name = "stampcart", about = "Stamp shop catalog and cart", long_about = None)]
pub struct Config {
    /// YAML catalog file
    #[arg(long, env = "STAMPCART_CATALOG", default_value = "fixtures/products/stamps.yml")]
    pub catalog: PathBuf,

    /// Directory the cart is persisted in
    #[arg(long, env = "STAMPCART_DATA_DIR", default_value = ".stampcart")]
    pub data_dir: PathBuf,

    /// Storage key the cart is persisted under
    #[arg(long, env = "STAMPCART_CART_KEY", default_value = DEFAULT_CART_KEY)]
    pub cart_key: String,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

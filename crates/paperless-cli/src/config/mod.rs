//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── update  # ReqwestConfig + items (--input or inline flags)
//! ├── schema  # --resource, --operation
//! └── health  # ReqwestConfig
//! ```
//!
//! Connection settings can be provided via CLI arguments or environment
//! variables (`PAPERLESS_URL`, `PAPERLESS_TOKEN`, `HTTP_TIMEOUT`,
//! `HTTP_USER_AGENT`).

mod update;

use std::process;

use clap::{Args, Parser, Subcommand};
use paperless_reqwest::ReqwestConfig;
pub use update::UpdateArgs;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "paperless")]
#[command(about = "Paperless-ngx document operations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Update one or more documents.
    Update(UpdateArgs),
    /// Print the parameter table of an operation as JSON.
    Schema(SchemaArgs),
    /// Check that the Paperless instance is reachable.
    Health(HealthArgs),
}

/// Arguments of the `schema` subcommand.
#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {
    /// Resource the fields are shown for.
    #[arg(long, default_value = "document")]
    pub resource: String,

    /// Operation the fields are shown for.
    #[arg(long, default_value = "update")]
    pub operation: String,
}

/// Arguments of the `health` subcommand.
#[derive(Debug, Clone, Args)]
pub struct HealthArgs {
    #[clap(flatten)]
    pub paperless: ReqwestConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs build information and connection settings (never the token).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        let paperless = match &self.command {
            Command::Update(args) => &args.paperless,
            Command::Health(args) => &args.paperless,
            Command::Schema(_) => return,
        };

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            base_url = %paperless.base_url,
            timeout_secs = paperless.effective_timeout().as_secs(),
            user_agent = %paperless.effective_user_agent(),
            "Paperless configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

//! # Brand Admin
//!
//! Entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Either the HTTP server or a console command

use anyhow::Result;
use clap::Parser;
use tracing::info;

use brand_admin::config::Settings;
use brand_admin::console::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from environment and config files
    let settings = Settings::load()?;

    // Initialize tracing subscriber for structured logging
    brand_admin::telemetry::init_tracing(&settings.logging.format);

    info!(
        environment = %settings.environment,
        command = ?cli.command,
        "Starting Brand Admin..."
    );

    let code = console::run(cli, settings).await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

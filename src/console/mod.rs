//! Console commands.
//!
//! `serve` runs the HTTP server. `metrics:persist-brand-performance` runs
//! the brand performance snapshot once and exits with its code.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::application::services::{SnapshotOptions, SnapshotOutput};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::startup::{AppState, Application};

#[derive(Parser, Debug)]
#[command(name = "brand-admin", version, about = "Brand admin service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Persist current performance values
    #[command(name = "metrics:persist-brand-performance")]
    PersistBrandPerformance {
        /// Comma separated brand ids
        #[arg(long)]
        ids: Option<String>,
    },
}

/// Writes snapshot progress to stdout and the log.
pub struct ConsoleOutput;

impl SnapshotOutput for ConsoleOutput {
    fn line(&self, text: &str) {
        println!("{}", text);
        tracing::info!(target: "console", "{}", text);
    }

    fn comment(&self, text: &str) {
        println!("{}", text.yellow());
        tracing::info!(target: "console", "{}", text);
    }

    fn info(&self, text: &str) {
        println!("{}", text.green());
        tracing::info!(target: "console", "{}", text);
    }
}

/// Run the parsed command and return the process exit code.
pub async fn run(cli: Cli, settings: Settings) -> anyhow::Result<i32> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = Application::build(settings).await?;
            app.run_until_stopped().await?;
            Ok(0)
        }
        Command::PersistBrandPerformance { ids } => {
            let db = database::create_pool(&settings.database).await?;
            let state = AppState::from_pool(db, settings);

            let ids = ids.as_deref().map(SnapshotOptions::parse_ids).unwrap_or_default();
            let options = SnapshotOptions::new(ids).with_output(Arc::new(ConsoleOutput));

            let code = state.performance_snapshot().run_as_console_command(&options).await?;
            Ok(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot_command() {
        let cli = Cli::try_parse_from(["brand-admin", "metrics:persist-brand-performance", "--ids", "1,2"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::PersistBrandPerformance {
                ids: Some("1,2".into())
            })
        );
    }

    #[test]
    fn test_serve_is_default() {
        let cli = Cli::try_parse_from(["brand-admin"]).unwrap();
        assert_eq!(cli.command, None);
    }
}

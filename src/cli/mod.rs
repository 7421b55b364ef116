//! Command-line interface wiring for kbqa-nlu.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod batch;
pub mod extract;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Medical question entity and intent extraction", long_about = None)]
pub struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log: String,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Extract(args) => extract::run(args, settings).await,
            Commands::Batch(args) => batch::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract entities and intents from one question.
    Extract(extract::Args),
    /// Extract from a file of questions, one per line, writing JSON lines.
    Batch(batch::Args),
    /// Serve the extraction JSON API.
    Serve(serve::Args),
}

//! CLI entry-point for single-question extraction.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{config::Settings, nlp};

/// Args for the `extract` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Question text.
    pub question: String,
    /// Print single-line JSON instead of pretty output.
    #[arg(long)]
    pub compact: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let extractor = nlp::load_extractor(&settings)?;
    let result = extractor.extract(&args.question)?;
    let rendered = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{rendered}");
    Ok(())
}

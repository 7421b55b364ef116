//! Entry point wiring CLI dispatch to the extraction engine.

use anyhow::Result;
use kbqa_nlu::{cli::Cli, config::Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log)?;
    let settings = Settings::load()?;

    info!(data_dir = %settings.data_dir.display(), "starting command");
    cli.dispatch(settings).await
}

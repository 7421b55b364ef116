//! CLI entry-point for serving the extraction API.

use std::sync::Arc;

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{api, config::Settings, nlp};

/// Args for the `serve` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Port to bind.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

/// Models load before the listener binds, so the first request never waits on warm-up.
#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let extractor = tokio::task::spawn_blocking(move || nlp::load_extractor(&settings)).await??;
    api::serve(Arc::new(extractor), &args.host, args.port).await
}

//! CLI entry-point for extracting a file of questions.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args as ClapArgs;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    config::Settings,
    nlp::{self, ExtractionResult, Extractor},
};

/// Args for the `batch` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Text file with one question per line.
    #[arg(long)]
    pub input: PathBuf,
    /// JSON lines destination; stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BatchRow<'a> {
    question: &'a str,
    result: ExtractionResult,
}

/// Serialised rows plus the number of questions that could not be extracted.
#[derive(Debug, Default)]
pub struct BatchOutput {
    pub rows: Vec<String>,
    pub failed: usize,
}

/// Extract every non-blank line of `raw`. Fails only when no question succeeds.
pub fn extract_lines(extractor: &Extractor, raw: &str) -> Result<BatchOutput> {
    let mut output = BatchOutput::default();
    for question in raw.lines().map(str::trim).filter(|q| !q.is_empty()) {
        match extractor.extract(question) {
            Ok(result) => output
                .rows
                .push(serde_json::to_string(&BatchRow { question, result })?),
            Err(err) => {
                output.failed += 1;
                warn!(%question, error = %err, "extraction failed");
            }
        }
    }
    if output.rows.is_empty() && output.failed > 0 {
        bail!("all {} questions failed extraction", output.failed);
    }
    Ok(output)
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let extractor = nlp::load_extractor(&settings)?;
    let raw = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("reading {}", args.input.display()))?;

    let BatchOutput { rows, failed } = extract_lines(&extractor, &raw)?;
    let mut body = rows.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, body).await?;
            info!(path = %path.display(), rows = rows.len(), failed, "wrote extraction results");
        }
        None => {
            print!("{body}");
            info!(rows = rows.len(), failed, "extraction results written to stdout");
        }
    }
    Ok(())
}

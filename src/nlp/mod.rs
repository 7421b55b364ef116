//! Entity recognition and intent resolution engine.

pub mod classifier;
pub mod embeddings;
pub mod extractor;
pub mod features;
pub mod intent;
pub mod linker;
pub mod matcher;
pub mod segment;
pub mod vocab;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Settings;

pub use extractor::{ExtractionResult, Extractor, ExtractorContext};

/// Load vocabularies and models named in `settings` and build the extractor.
pub fn load_extractor(settings: &Settings) -> Result<Extractor> {
    let vocabulary = vocab::Vocabulary::load(&settings.vocabulary_paths())
        .context("loading category vocabularies")?;
    let stopwords =
        vocab::StopWords::load(&settings.stopwords).context("loading stopword list")?;
    let segmenter = segment::JiebaSegmenter::new(&vocabulary, settings.user_dict.as_deref())
        .context("seeding segmenter")?;

    let embeddings = match &settings.word_vectors {
        Some(path) => embeddings::WordVectors::load(path)
            .with_context(|| format!("loading word vectors from {}", path.display()))?,
        None => {
            warn!("WORD_VECTORS not set; fuzzy linking runs without embedding similarity");
            embeddings::WordVectors::empty()
        }
    };

    let model = match &settings.intent_model {
        Some(path) => Some(
            classifier::IntentModel::load(path)
                .with_context(|| format!("loading intent model from {}", path.display()))?,
        ),
        None => {
            warn!("INTENT_MODEL not set; resolving intents from trigger rules only");
            None
        }
    };

    info!(
        terms = vocabulary.len(),
        stopwords = stopwords.len(),
        "building extractor"
    );
    let ctx = ExtractorContext {
        vocabulary: Arc::new(vocabulary),
        stopwords: Arc::new(stopwords),
        segmenter: Arc::new(segmenter),
        embeddings: Arc::new(embeddings),
        model,
        linker: settings.linker_config(),
    };
    Extractor::new(ctx).context("building dictionary automata")
}

//! Question → entities + intents, the engine's single entry point.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    error::Result,
    nlp::{
        classifier::IntentModel,
        embeddings::EmbeddingLookup,
        intent::IntentResolver,
        linker::{FuzzyLinker, LinkerConfig},
        matcher::{DictionaryMatcher, EntityMap},
        segment::{Segmenter, Tokenizer},
        vocab::{Intent, StopWords, Vocabulary},
    },
};

/// Entities per category plus the resolved intents.
///
/// Serialises flat, e.g. `{"Disease": ["感冒"], "intentions": ["query_symptom"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(flatten)]
    pub entities: EntityMap,
    pub intentions: Vec<Intent>,
}

/// Everything the engine reads, built once at startup.
#[derive(Clone)]
pub struct ExtractorContext {
    pub vocabulary: Arc<Vocabulary>,
    pub stopwords: Arc<StopWords>,
    pub segmenter: Arc<dyn Segmenter>,
    pub embeddings: Arc<dyn EmbeddingLookup>,
    /// Without a model the resolver runs on trigger rules alone.
    pub model: Option<IntentModel>,
    pub linker: LinkerConfig,
}

pub struct Extractor {
    matcher: DictionaryMatcher,
    linker: FuzzyLinker,
    resolver: IntentResolver,
}

impl Extractor {
    pub fn new(ctx: ExtractorContext) -> Result<Self> {
        let matcher = DictionaryMatcher::new(&ctx.vocabulary)?;
        let tokenizer = Tokenizer::new(ctx.segmenter, ctx.stopwords);
        let linker = FuzzyLinker::new(
            ctx.vocabulary,
            tokenizer.clone(),
            ctx.embeddings,
            ctx.linker,
        );
        let resolver = match ctx.model {
            Some(model) => IntentResolver::with_model(tokenizer, model),
            None => IntentResolver::rules_only(),
        };
        info!(statistical = resolver.has_model(), "extractor ready");
        Ok(Self {
            matcher,
            linker,
            resolver,
        })
    }

    /// Exact matches, or the fuzzy link when there are none. Never merged.
    pub fn recognize(&self, question: &str) -> EntityMap {
        let exact = self.matcher.match_entities(question);
        if !exact.is_empty() {
            return exact;
        }
        debug!("no dictionary hit, falling back to fuzzy linking");
        self.linker.link(question)
    }

    #[instrument(skip(self))]
    pub fn extract(&self, question: &str) -> Result<ExtractionResult> {
        let entities = self.recognize(question);
        let intentions = self.resolver.resolve(question, &entities)?;
        debug!(?entities, ?intentions, "extraction complete");
        Ok(ExtractionResult {
            entities,
            intentions,
        })
    }
}

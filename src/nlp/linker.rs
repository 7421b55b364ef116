//! Similarity-based entity linking, used when exact matching finds nothing.
//!
//! Each (token, vocabulary entry) pair is scored from up to three signals:
//! character overlap, embedding cosine and normalised edit distance. The
//! score is the mean of whichever signals are defined for the pair, and only
//! the single best pair above the threshold is linked.

use std::{collections::HashSet, sync::Arc};

use serde::Serialize;
use strsim::levenshtein;
use tracing::debug;

use crate::nlp::{
    embeddings::EmbeddingLookup,
    matcher::EntityMap,
    segment::Tokenizer,
    vocab::{Category, Vocabulary},
};

/// Tunables for fuzzy linking.
#[derive(Debug, Clone, Copy)]
pub struct LinkerConfig {
    /// Minimum composite score for a pair to become a candidate.
    pub threshold: f64,
    /// Tokens with fewer characters are ignored.
    pub min_token_chars: usize,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            min_token_chars: 2,
        }
    }
}

/// A vocabulary entry that cleared the threshold for some token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub token: String,
    pub entity: String,
    pub category: Category,
    pub score: f64,
}

/// Shared characters of `token` found in `entry`, over the distinct characters of both.
pub fn overlap_score(token: &str, entry: &str) -> Option<f64> {
    let shared = token.chars().filter(|c| entry.contains(*c)).count();
    if shared == 0 {
        return None;
    }
    let distinct: HashSet<char> = token.chars().chain(entry.chars()).collect();
    Some(shared as f64 / distinct.len() as f64)
}

/// `1 - levenshtein / (|token| + |entry|)`, undefined when it would be zero.
pub fn edit_score(token: &str, entry: &str) -> Option<f64> {
    let total = token.chars().count() + entry.chars().count();
    if total == 0 {
        return None;
    }
    let score = 1.0 - levenshtein(token, entry) as f64 / total as f64;
    (score != 0.0).then_some(score)
}

/// Mean of the defined components; `None` when no component is defined.
pub fn composite_score(token: &str, entry: &str, embeddings: &dyn EmbeddingLookup) -> Option<f64> {
    let parts = [
        overlap_score(token, entry),
        embeddings.similarity(token, entry).map(f64::from),
        edit_score(token, entry),
    ];
    let defined: Vec<f64> = parts.into_iter().flatten().collect();
    if defined.is_empty() {
        return None;
    }
    Some(defined.iter().sum::<f64>() / defined.len() as f64)
}

pub struct FuzzyLinker {
    vocab: Arc<Vocabulary>,
    tokenizer: Tokenizer,
    embeddings: Arc<dyn EmbeddingLookup>,
    config: LinkerConfig,
}

impl FuzzyLinker {
    pub fn new(
        vocab: Arc<Vocabulary>,
        tokenizer: Tokenizer,
        embeddings: Arc<dyn EmbeddingLookup>,
        config: LinkerConfig,
    ) -> Self {
        Self {
            vocab,
            tokenizer,
            embeddings,
            config,
        }
    }

    /// All pairs at or above the threshold, best first. Ties keep token order,
    /// then category order, then vocabulary order.
    pub fn candidates(&self, question: &str) -> Vec<Candidate> {
        let tokens = self
            .tokenizer
            .content_tokens(question, self.config.min_token_chars);
        let mut candidates = Vec::new();
        for token in &tokens {
            for category in Category::ALL {
                for entry in self.vocab.entries(category) {
                    let Some(score) = composite_score(token, entry, self.embeddings.as_ref())
                    else {
                        continue;
                    };
                    if score >= self.config.threshold {
                        candidates.push(Candidate {
                            token: token.clone(),
                            entity: entry.to_string(),
                            category,
                            score,
                        });
                    }
                }
            }
        }
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(tokens = tokens.len(), candidates = candidates.len(), "fuzzy candidates");
        candidates
    }

    /// Link at most one entity; an empty map when nothing clears the threshold.
    pub fn link(&self, question: &str) -> EntityMap {
        let mut linked = EntityMap::new();
        match self.candidates(question).into_iter().next() {
            Some(best) => {
                debug!(
                    token = %best.token,
                    entity = %best.entity,
                    category = %best.category,
                    score = best.score,
                    "fuzzy link"
                );
                linked.insert(best.category, vec![best.entity]);
            }
            None => debug!("no fuzzy candidate cleared the threshold"),
        }
        linked
    }
}

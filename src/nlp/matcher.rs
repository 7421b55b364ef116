//! Exact dictionary recognition with one Aho-Corasick automaton per category.

use aho_corasick::AhoCorasick;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    error::Result,
    nlp::vocab::{Category, Vocabulary},
};

/// Recognised entities keyed by category, in discovery order.
pub type EntityMap = IndexMap<Category, Vec<String>>;

struct CategoryAutomaton {
    category: Category,
    automaton: AhoCorasick,
    terms: Vec<String>,
}

/// Multi-pattern matcher reporting every vocabulary entry that occurs in a question.
pub struct DictionaryMatcher {
    automata: Vec<CategoryAutomaton>,
}

impl DictionaryMatcher {
    pub fn new(vocab: &Vocabulary) -> Result<Self> {
        let mut automata = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let terms: Vec<String> = vocab.entries(category).map(str::to_string).collect();
            let automaton = AhoCorasick::new(&terms)?;
            debug!(%category, patterns = terms.len(), "built automaton");
            automata.push(CategoryAutomaton {
                category,
                automaton,
                terms,
            });
        }
        Ok(Self { automata })
    }

    /// Report overlapping and nested hits too; an empty map means nothing matched.
    pub fn match_entities(&self, question: &str) -> EntityMap {
        let mut found = EntityMap::new();
        for entry in &self.automata {
            for hit in entry.automaton.find_overlapping_iter(question) {
                let term = &entry.terms[hit.pattern().as_usize()];
                found
                    .entry(entry.category)
                    .or_insert_with(Vec::new)
                    .push(term.clone());
            }
        }
        debug!(categories = found.len(), "dictionary match");
        found
    }
}

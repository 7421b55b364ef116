//! Word segmentation biased towards the domain vocabulary.

use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use jieba_rs::Jieba;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::{
    error::{NluError, Result},
    nlp::vocab::{StopWords, Vocabulary},
};

/// Splits free text into words.
pub trait Segmenter: Send + Sync {
    fn cut(&self, text: &str) -> Vec<String>;
}

/// jieba segmenter with every vocabulary entry registered as a user word.
pub struct JiebaSegmenter {
    jieba: Jieba,
}

impl JiebaSegmenter {
    pub fn new(vocab: &Vocabulary, user_dict: Option<&Path>) -> Result<Self> {
        let mut jieba = Jieba::new();
        let mut added = 0usize;
        for term in vocab.all_terms() {
            jieba.add_word(term, None, None);
            added += 1;
        }
        if let Some(path) = user_dict {
            let file = File::open(path)?;
            jieba.load_dict(&mut BufReader::new(file)).map_err(|e| {
                NluError::Segmenter(format!("user dictionary {}: {e}", path.display()))
            })?;
            info!(path = %path.display(), "loaded user dictionary");
        }
        info!(terms = added, "segmenter seeded with vocabulary");
        Ok(Self { jieba })
    }
}

impl Segmenter for JiebaSegmenter {
    fn cut(&self, text: &str) -> Vec<String> {
        self.jieba
            .cut(text, true)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

static ASCII_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[[:punct:]]").expect("valid regex"));
static FULLWIDTH_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[，。‘’；：？、！【】]").expect("valid regex"));

/// Drop ASCII punctuation and blank out the common full-width marks.
pub fn strip_punctuation(text: &str) -> String {
    let text = ASCII_PUNCT.replace_all(text, "");
    FULLWIDTH_PUNCT.replace_all(&text, " ").trim().to_string()
}

/// Segmenter plus stopword filtering, shared by the linker and the vectorizer.
#[derive(Clone)]
pub struct Tokenizer {
    segmenter: Arc<dyn Segmenter>,
    stopwords: Arc<StopWords>,
}

impl Tokenizer {
    pub fn new(segmenter: Arc<dyn Segmenter>, stopwords: Arc<StopWords>) -> Self {
        Self {
            segmenter,
            stopwords,
        }
    }

    /// Punctuation-stripped, trimmed, non-stopword tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let cleaned = strip_punctuation(text);
        self.segmenter
            .cut(&cleaned)
            .into_iter()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty() && !self.stopwords.contains(token))
            .collect()
    }

    /// Like [`Tokenizer::tokens`] but also drops tokens shorter than `min_chars`.
    pub fn content_tokens(&self, text: &str, min_chars: usize) -> Vec<String> {
        self.tokens(text)
            .into_iter()
            .filter(|token| token.chars().count() >= min_chars)
            .collect()
    }
}

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use kbqa_nlu::{
    nlp::{
        classifier::{IntentClassifier, IntentModel, TfidfVectorizer},
        embeddings::{EmbeddingLookup, WordVectors},
        linker::LinkerConfig,
        segment::{Segmenter, Tokenizer},
        vocab::{Category, Intent, StopWords, Vocabulary},
    },
    ExtractorContext, NluError,
};
use ndarray::Array1;

/// Splits on whitespace so tests control token boundaries exactly.
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn cut(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

#[derive(Default)]
pub struct CountingSegmenter {
    pub calls: AtomicUsize,
}

impl CountingSegmenter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Segmenter for CountingSegmenter {
    fn cut(&self, text: &str) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        WhitespaceSegmenter.cut(text)
    }
}

pub struct FixedClassifier(pub Intent);

impl IntentClassifier for FixedClassifier {
    fn predict(&self, _features: &Array1<f32>) -> kbqa_nlu::Result<Intent> {
        Ok(self.0)
    }
}

pub struct FailingClassifier;

impl IntentClassifier for FailingClassifier {
    fn predict(&self, _features: &Array1<f32>) -> kbqa_nlu::Result<Intent> {
        Err(NluError::Classifier("malformed feature vector".into()))
    }
}

pub fn vocabulary() -> Vocabulary {
    Vocabulary::from_entries([
        (Category::Disease, vec!["感冒", "感冒发烧", "肺炎"]),
        (Category::Alias, vec!["伤寒"]),
        (Category::Symptom, vec!["发烧", "头痛", "肚子痛"]),
        (Category::Complication, vec!["心肌炎"]),
    ])
}

pub fn stopwords() -> StopWords {
    ["的", "了", "我", "怎么办", "是"].into_iter().collect()
}

pub fn tokenizer() -> Tokenizer {
    Tokenizer::new(Arc::new(WhitespaceSegmenter), Arc::new(stopwords()))
}

pub fn model_with(classifier: Arc<dyn IntentClassifier>) -> IntentModel {
    let vectorizer =
        TfidfVectorizer::new(Default::default(), Vec::new()).expect("empty vectorizer");
    IntentModel::new(Arc::new(vectorizer), classifier)
}

pub fn context(vocabulary: Vocabulary) -> ExtractorContext {
    context_with(vocabulary, Arc::new(WhitespaceSegmenter), Arc::new(WordVectors::empty()))
}

pub fn context_with(
    vocabulary: Vocabulary,
    segmenter: Arc<dyn Segmenter>,
    embeddings: Arc<dyn EmbeddingLookup>,
) -> ExtractorContext {
    ExtractorContext {
        vocabulary: Arc::new(vocabulary),
        stopwords: Arc::new(stopwords()),
        segmenter,
        embeddings,
        model: None,
        linker: LinkerConfig::default(),
    }
}

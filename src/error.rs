//! Error type shared by the recognition engine.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NluError {
    #[error("vocabulary file {path} is missing or unreadable: {source}")]
    VocabularyIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vocabulary file {0} contains no entries")]
    EmptyVocabulary(PathBuf),

    #[error("word vector file {path}, line {line}: {reason}")]
    WordVectors {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("segmenter dictionary error: {0}")]
    Segmenter(String),

    #[error("intent model error: {0}")]
    Model(String),

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("unknown intent label: {0}")]
    UnknownIntent(String),

    #[error("failed to build dictionary automaton: {0}")]
    Automaton(#[from] aho_corasick::BuildError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NluError>;

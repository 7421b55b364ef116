//! Runtime configuration utilities for kbqa-nlu.

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::nlp::{linker::LinkerConfig, vocab::VocabularyPaths};

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root folder holding vocabularies and model artefacts.
    pub data_dir: PathBuf,
    pub disease_vocab: PathBuf,
    pub alias_vocab: PathBuf,
    pub symptom_vocab: PathBuf,
    pub complication_vocab: PathBuf,
    pub stopwords: PathBuf,
    /// Extra segmenter dictionary (`word [freq] [tag]` per line).
    pub user_dict: Option<PathBuf>,
    /// word2vec text file; fuzzy linking runs without embeddings when absent.
    pub word_vectors: Option<PathBuf>,
    /// JSON vectorizer + classifier artifact; rules-only intents when absent.
    pub intent_model: Option<PathBuf>,
    /// Minimum composite score for a fuzzy link.
    pub link_threshold: f64,
    /// Shortest token considered by the fuzzy linker.
    pub min_token_chars: usize,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let data_dir = env::var("KBQA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let file = |key: &str, default: &str| {
            env::var(key)
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir.join(default))
        };
        let optional = |key: &str| {
            env::var(key)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
        };

        let defaults = LinkerConfig::default();
        let link_threshold = parse_var("LINK_THRESHOLD", defaults.threshold)?;
        let min_token_chars = parse_var("MIN_TOKEN_CHARS", defaults.min_token_chars)?;

        let disease_vocab = file("DISEASE_VOCAB", "disease_vocab.txt");
        let alias_vocab = file("ALIAS_VOCAB", "alias_vocab.txt");
        let symptom_vocab = file("SYMPTOM_VOCAB", "symptom_vocab.txt");
        let complication_vocab = file("COMPLICATION_VOCAB", "complications_vocab.txt");
        let stopwords = file("STOPWORDS", "stop_words.utf8");

        Ok(Self {
            data_dir,
            disease_vocab,
            alias_vocab,
            symptom_vocab,
            complication_vocab,
            stopwords,
            user_dict: optional("USER_DICT"),
            word_vectors: optional("WORD_VECTORS"),
            intent_model: optional("INTENT_MODEL"),
            link_threshold,
            min_token_chars,
        })
    }

    /// Settings rooted at `data_dir` with the default file names and no optional artefacts.
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let defaults = LinkerConfig::default();
        Self {
            disease_vocab: data_dir.join("disease_vocab.txt"),
            alias_vocab: data_dir.join("alias_vocab.txt"),
            symptom_vocab: data_dir.join("symptom_vocab.txt"),
            complication_vocab: data_dir.join("complications_vocab.txt"),
            stopwords: data_dir.join("stop_words.utf8"),
            user_dict: None,
            word_vectors: None,
            intent_model: None,
            link_threshold: defaults.threshold,
            min_token_chars: defaults.min_token_chars,
            data_dir,
        }
    }

    pub fn vocabulary_paths(&self) -> VocabularyPaths {
        VocabularyPaths {
            disease: self.disease_vocab.clone(),
            alias: self.alias_vocab.clone(),
            symptom: self.symptom_vocab.clone(),
            complication: self.complication_vocab.clone(),
        }
    }

    pub fn linker_config(&self) -> LinkerConfig {
        LinkerConfig {
            threshold: self.link_threshold,
            min_token_chars: self.min_token_chars,
        }
    }
}

/// Parse `key` when set; an unparsable value is an error rather than the default.
fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key}={raw}: {e}")),
        Err(_) => Ok(default),
    }
}

//! Pretrained text vectorizer and linear intent classifier.
//!
//! Both halves are produced offline and shipped as one JSON artifact:
//!
//! ```json
//! {
//!   "vectorizer": { "vocab": { "感冒": 0, "症状": 1 }, "idf": [1.2, 0.8] },
//!   "classifier": {
//!     "labels": ["query_symptom", "query_cureway"],
//!     "coeffs": [[...], [...]],
//!     "intercept": [0.1, -0.1]
//!   }
//! }
//! ```
//!
//! `coeffs` rows have one weight per text feature plus one per trigger set.

use std::{collections::HashMap, fs::File, io::BufReader, path::Path, sync::Arc};

use ndarray::{Array1, Array2};
use serde::Deserialize;
use tracing::info;

use crate::{
    error::{NluError, Result},
    nlp::{features::TRIGGER_DIMS, vocab::Intent},
};

/// Maps filtered question tokens to a fixed-length text feature vector.
pub trait TextVectorizer: Send + Sync {
    fn transform(&self, tokens: &[String]) -> Array1<f32>;
    fn dim(&self) -> usize;
}

/// Predicts a single intent from a complete feature vector.
pub trait IntentClassifier: Send + Sync {
    fn predict(&self, features: &Array1<f32>) -> Result<Intent>;
}

/// Term-frequency × idf weights, L2 normalised.
#[derive(Debug, Clone, Deserialize)]
pub struct TfidfVectorizer {
    vocab: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    pub fn new(vocab: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self> {
        let vectorizer = Self { vocab, idf };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<()> {
        if let Some((token, idx)) = self.vocab.iter().find(|(_, idx)| **idx >= self.idf.len()) {
            return Err(NluError::Model(format!(
                "vectorizer column {idx} for {token} is outside idf length {}",
                self.idf.len()
            )));
        }
        Ok(())
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn transform(&self, tokens: &[String]) -> Array1<f32> {
        let mut row = Array1::<f32>::zeros(self.idf.len());
        for token in tokens {
            if let Some(&idx) = self.vocab.get(token) {
                row[idx] += 1.0;
            }
        }
        for (value, idf) in row.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let norm = row.dot(&row).sqrt();
        if norm > 0.0 {
            row /= norm;
        }
        row
    }

    fn dim(&self) -> usize {
        self.idf.len()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawLinearModel {
    labels: Vec<String>,
    coeffs: Vec<Vec<f32>>,
    intercept: Vec<f32>,
}

/// Multi-class linear model: `argmax(coeffs · x + intercept)`.
#[derive(Debug, Clone)]
pub struct LinearIntentModel {
    labels: Vec<Intent>,
    weights: Array2<f32>,
    intercept: Array1<f32>,
}

impl LinearIntentModel {
    pub fn new(labels: Vec<Intent>, coeffs: Vec<Vec<f32>>, intercept: Vec<f32>) -> Result<Self> {
        let rows = coeffs.len();
        if rows == 0 || rows != labels.len() || rows != intercept.len() {
            return Err(NluError::Model(format!(
                "{} labels, {rows} coefficient rows and {} intercepts do not line up",
                labels.len(),
                intercept.len()
            )));
        }
        let cols = coeffs[0].len();
        if coeffs.iter().any(|row| row.len() != cols) {
            return Err(NluError::Model("ragged coefficient matrix".into()));
        }
        let flat: Vec<f32> = coeffs.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| NluError::Model(e.to_string()))?;
        Ok(Self {
            labels,
            weights,
            intercept: Array1::from(intercept),
        })
    }

    fn from_raw(raw: RawLinearModel) -> Result<Self> {
        let labels = raw
            .labels
            .iter()
            .map(|label| label.parse())
            .collect::<Result<Vec<Intent>>>()?;
        Self::new(labels, raw.coeffs, raw.intercept)
    }

    /// Expected feature vector length.
    pub fn input_dim(&self) -> usize {
        self.weights.ncols()
    }
}

impl IntentClassifier for LinearIntentModel {
    fn predict(&self, features: &Array1<f32>) -> Result<Intent> {
        if features.len() != self.input_dim() {
            return Err(NluError::Classifier(format!(
                "feature vector has {} dimensions, model expects {}",
                features.len(),
                self.input_dim()
            )));
        }
        let scores = self.weights.dot(features) + &self.intercept;
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate() {
            if score.is_nan() {
                return Err(NluError::Classifier("classifier produced NaN score".into()));
            }
            if *score > scores[best] {
                best = idx;
            }
        }
        Ok(self.labels[best])
    }
}

#[derive(Debug, Deserialize)]
struct IntentModelFile {
    vectorizer: TfidfVectorizer,
    classifier: RawLinearModel,
}

/// A vectorizer and classifier pair with compatible dimensions.
#[derive(Clone)]
pub struct IntentModel {
    pub vectorizer: Arc<dyn TextVectorizer>,
    pub classifier: Arc<dyn IntentClassifier>,
}

impl IntentModel {
    pub fn new(vectorizer: Arc<dyn TextVectorizer>, classifier: Arc<dyn IntentClassifier>) -> Self {
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Load and cross-check the JSON model artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let file: IntentModelFile = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        file.vectorizer.validate()?;
        let classifier = LinearIntentModel::from_raw(file.classifier)?;
        let expected = file.vectorizer.dim() + TRIGGER_DIMS;
        if classifier.input_dim() != expected {
            return Err(NluError::Model(format!(
                "classifier takes {} features but vectorizer yields {} (+{TRIGGER_DIMS} trigger counts)",
                classifier.input_dim(),
                file.vectorizer.dim()
            )));
        }
        info!(
            path = %path.display(),
            text_dim = file.vectorizer.dim(),
            labels = classifier.labels.len(),
            "loaded intent model"
        );
        Ok(Self::new(Arc::new(file.vectorizer), Arc::new(classifier)))
    }
}

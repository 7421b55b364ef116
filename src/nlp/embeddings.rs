//! Pretrained word vector lookup used for semantic similarity.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{info, warn};

use crate::error::{NluError, Result};

/// Similarity between two surface strings, if both have vectors.
pub trait EmbeddingLookup: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> Option<f32>;
}

/// In-memory word vectors, e.g. loaded from a word2vec text dump.
#[derive(Debug, Clone, Default)]
pub struct WordVectors {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordVectors {
    /// An empty table: every similarity is undefined.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for (idx, (token, vector)) in pairs.into_iter().enumerate() {
            table.insert(token.into(), vector).map_err(|reason| NluError::WordVectors {
                path: "<memory>".into(),
                line: idx + 1,
                reason,
            })?;
        }
        Ok(table)
    }

    /// Load the word2vec text format; the `<count> <dim>` header line is optional.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut table = Self::default();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let Some(token) = fields.next() else {
                continue;
            };
            let values: Vec<&str> = fields.collect();
            if idx == 0 && values.len() == 1 && token.parse::<usize>().is_ok() {
                continue;
            }
            let vector = values
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| NluError::WordVectors {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: e.to_string(),
                })?;
            table
                .insert(token.to_string(), vector)
                .map_err(|reason| NluError::WordVectors {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason,
                })?;
        }
        if table.is_empty() {
            warn!(path = %path.display(), "word vector file holds no vectors");
        }
        info!(path = %path.display(), words = table.len(), dim = table.dim, "loaded word vectors");
        Ok(table)
    }

    fn insert(&mut self, token: String, vector: Vec<f32>) -> std::result::Result<(), String> {
        if vector.is_empty() {
            return Err(format!("no components for {token}"));
        }
        if self.dim == 0 {
            self.dim = vector.len();
        } else if vector.len() != self.dim {
            return Err(format!(
                "dimension {} for {token}, expected {}",
                vector.len(),
                self.dim
            ));
        }
        self.vectors.insert(token, vector);
        Ok(())
    }

    pub fn get(&self, token: &str) -> Option<&[f32]> {
        self.vectors.get(token).map(Vec::as_slice)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl EmbeddingLookup for WordVectors {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        Some(cosine(self.get(a)?, self.get(b)?))
    }
}

pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot = a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>();
    let norm_a = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

//! TF-IDF feature transformer over a fixed training vocabulary

use crate::error::{Result, SentimentError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Term weighting normalization applied to each document vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk form of a fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Term (or space-joined n-gram) to feature column
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature column
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_lowercase")]
    pub lowercase: bool,
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

/// Sparse document vector as `(feature column, weight)` pairs in column order
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    ngram_range: (usize, usize),
    norm: Option<Norm>,
    sublinear_tf: bool,
    lowercase: bool,
    stop_words: HashSet<String>,
    token_regex: Regex,
}

impl TfidfVectorizer {
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let n_features = artifact.idf.len();
        if n_features == 0 {
            return Err(SentimentError::StartupConfiguration(
                "vectorizer has an empty idf table".to_string(),
            ));
        }

        if let Some((term, &index)) = artifact.vocabulary.iter().find(|(_, &i)| i >= n_features) {
            return Err(SentimentError::StartupConfiguration(format!(
                "vocabulary term '{}' maps to column {} but only {} idf weights exist",
                term, index, n_features
            )));
        }

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SentimentError::StartupConfiguration(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_regex = Regex::new(&artifact.token_pattern).map_err(|e| {
            SentimentError::StartupConfiguration(format!("invalid token_pattern: {}", e))
        })?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            ngram_range: artifact.ngram_range,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
            lowercase: artifact.lowercase,
            stop_words: artifact.stop_words.into_iter().collect(),
            token_regex,
        })
    }

    /// Width of the feature vectors this transformer produces
    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn ngram_range(&self) -> (usize, usize) {
        self.ngram_range
    }

    /// Map a document to its TF-IDF vector. Terms outside the training
    /// vocabulary contribute nothing; a document with no known terms maps to
    /// the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let doc = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_regex
            .find_iter(&doc)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.word_ngrams(&tokens) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (column, tf * self.idf[column])
            })
            .collect();

        let norm = match self.norm {
            Some(Norm::L2) => vector.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => vector.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if norm > 0.0 {
            vector.iter_mut().for_each(|(_, v)| *v /= norm);
        }

        vector
    }

    /// Unigrams first (when requested), then each longer n-gram size in order
    fn word_ngrams(&self, tokens: &[&str]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();

        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }

        terms
    }
}

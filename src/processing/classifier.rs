//! Linear (logistic regression) classifier over TF-IDF features

use crate::error::{Result, SentimentError};
use crate::processing::vectorizer::SparseVector;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// How per-class scores were fit, which decides how they become probabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    Multinomial,
    Ovr,
}

/// On-disk form of a fitted logistic regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticArtifact {
    /// One row of feature weights per class
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    /// Encoded class value for each row of `coef`
    pub classes: Vec<i64>,
    #[serde(default = "default_multi_class")]
    pub multi_class: MultiClass,
}

fn default_multi_class() -> MultiClass {
    MultiClass::Multinomial
}

#[derive(Debug)]
pub struct LogisticModel {
    coef: Array2<f64>,
    intercept: Array1<f64>,
    classes: Vec<i64>,
    multi_class: MultiClass,
}

impl LogisticModel {
    pub fn from_artifact(artifact: LogisticArtifact) -> Result<Self> {
        let n_classes = artifact.coef.len();
        if n_classes < 2 {
            return Err(SentimentError::StartupConfiguration(format!(
                "logistic model needs at least 2 classes, found {}",
                n_classes
            )));
        }
        if artifact.intercept.len() != n_classes || artifact.classes.len() != n_classes {
            return Err(SentimentError::StartupConfiguration(format!(
                "logistic model has {} coefficient rows, {} intercepts and {} classes",
                n_classes,
                artifact.intercept.len(),
                artifact.classes.len()
            )));
        }

        let n_features = artifact.coef[0].len();
        if artifact.coef.iter().any(|row| row.len() != n_features) {
            return Err(SentimentError::StartupConfiguration(
                "logistic model coefficient rows differ in length".to_string(),
            ));
        }

        let flat: Vec<f64> = artifact.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((n_classes, n_features), flat).map_err(|e| {
            SentimentError::StartupConfiguration(format!("failed to build coefficient matrix: {}", e))
        })?;

        Ok(Self {
            coef,
            intercept: Array1::from(artifact.intercept),
            classes: artifact.classes,
            multi_class: artifact.multi_class,
        })
    }

    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Per-class score `coef · x + intercept`
    pub fn decision_function(&self, features: &SparseVector) -> Result<Array1<f64>> {
        let mut scores = self.intercept.clone();
        for &(column, value) in features {
            if column >= self.n_features() {
                return Err(SentimentError::Prediction(format!(
                    "feature column {} outside model width {}",
                    column,
                    self.n_features()
                )));
            }
            scores.scaled_add(value, &self.coef.column(column));
        }
        Ok(scores)
    }

    /// Position in `classes()` of the highest score; the first one wins ties
    pub fn predict_index(&self, features: &SparseVector) -> Result<usize> {
        let scores = self.decision_function(features)?;
        Ok(argmax(&scores))
    }

    /// Encoded class value with the highest score
    pub fn predict(&self, features: &SparseVector) -> Result<i64> {
        Ok(self.classes[self.predict_index(features)?])
    }

    pub fn predict_proba(&self, features: &SparseVector) -> Result<Array1<f64>> {
        let scores = self.decision_function(features)?;
        Ok(match self.multi_class {
            MultiClass::Multinomial => softmax(&scores),
            MultiClass::Ovr => {
                let sigmoid = scores.mapv(|s| 1.0 / (1.0 + (-s).exp()));
                let total = sigmoid.sum();
                if total > 0.0 {
                    sigmoid / total
                } else {
                    sigmoid
                }
            }
        })
    }
}

fn argmax(scores: &Array1<f64>) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

fn softmax(scores: &Array1<f64>) -> Array1<f64> {
    let max = scores.fold(f64::NEG_INFINITY, |acc, &s| acc.max(s));
    let exp = scores.mapv(|s| (s - max).exp());
    let total = exp.sum();
    exp / total
}

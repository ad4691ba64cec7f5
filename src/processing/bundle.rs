//! Classifier bundle: vectorizer, linear model and label decoder loaded as one unit

use crate::config::ModelConfig;
use crate::error::{Result, SentimentError};
use crate::processing::classifier::{LogisticArtifact, LogisticModel};
use crate::processing::label_encoder::LabelEncoder;
use crate::processing::sentiment::Sentiment;
use crate::processing::vectorizer::{TfidfVectorizer, VectorizerArtifact};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of classifying one normalized review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    /// Encoded class value returned by the model
    pub class_value: i64,
    /// Label name recorded by the decoder at training time
    pub class_name: String,
    /// Probability of the predicted class
    pub confidence: f64,
    pub probabilities: Vec<LabelProbability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelProbability {
    pub sentiment: Sentiment,
    pub probability: f64,
}

/// Summary of a loaded bundle, for `models check`
#[derive(Debug, Clone, Serialize)]
pub struct BundleInfo {
    pub vocabulary_size: usize,
    pub n_features: usize,
    pub ngram_range: (usize, usize),
    pub classes: Vec<i64>,
    pub class_names: Vec<String>,
}

#[derive(Debug)]
pub struct ClassifierBundle {
    vectorizer: TfidfVectorizer,
    model: LogisticModel,
    label_encoder: LabelEncoder,
}

impl ClassifierBundle {
    /// Load all three artifacts. Any missing, unreadable or inconsistent
    /// artifact is a startup configuration error.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        Self::load_from_paths(
            &config.vectorizer_path(),
            &config.model_path(),
            &config.label_encoder_path(),
        )
    }

    pub fn load_from_paths(vectorizer_path: &Path, model_path: &Path, label_encoder_path: &Path) -> Result<Self> {
        let vectorizer_artifact: VectorizerArtifact = read_artifact(vectorizer_path)?;
        let model_artifact: LogisticArtifact = read_artifact(model_path)?;
        let label_encoder: LabelEncoder = read_artifact(label_encoder_path)?;

        let bundle = Self::from_parts(
            TfidfVectorizer::from_artifact(vectorizer_artifact)?,
            LogisticModel::from_artifact(model_artifact)?,
            label_encoder,
        )?;

        info!(
            "Loaded classifier bundle: {} terms, {} features, {} classes",
            bundle.vectorizer.vocabulary_len(),
            bundle.vectorizer.n_features(),
            bundle.model.classes().len()
        );
        Ok(bundle)
    }

    pub fn from_parts(vectorizer: TfidfVectorizer, model: LogisticModel, label_encoder: LabelEncoder) -> Result<Self> {
        label_encoder.validate()?;

        if vectorizer.n_features() != model.n_features() {
            return Err(SentimentError::StartupConfiguration(format!(
                "vectorizer produces {} features but the model expects {}",
                vectorizer.n_features(),
                model.n_features()
            )));
        }

        if label_encoder.len() != model.classes().len() {
            return Err(SentimentError::StartupConfiguration(format!(
                "label encoder knows {} classes but the model predicts {}",
                label_encoder.len(),
                model.classes().len()
            )));
        }

        if let Some(unknown) = model.classes().iter().find(|&&c| Sentiment::from_class(c).is_none()) {
            return Err(SentimentError::StartupConfiguration(format!(
                "model class {} has no sentiment label (expected 0, 1 or 2)",
                unknown
            )));
        }

        Ok(Self {
            vectorizer,
            model,
            label_encoder,
        })
    }

    /// Classify already-normalized text.
    pub fn predict(&self, normalized: &str) -> Result<Prediction> {
        let features = self.vectorizer.transform(normalized);
        debug!("{} non-zero features", features.len());

        let index = self.model.predict_index(&features)?;
        let class_value = self.model.classes()[index];
        let sentiment = Sentiment::from_class(class_value).ok_or_else(|| {
            SentimentError::Prediction(format!("class {} is not in the label table", class_value))
        })?;

        let class_name = self
            .label_encoder
            .inverse_transform(class_value)
            .unwrap_or(sentiment.display_name())
            .to_string();

        let proba = self.model.predict_proba(&features)?;
        let probabilities: Vec<LabelProbability> = self
            .model
            .classes()
            .iter()
            .zip(proba.iter())
            .filter_map(|(&class, &probability)| {
                Sentiment::from_class(class).map(|sentiment| LabelProbability { sentiment, probability })
            })
            .collect();

        Ok(Prediction {
            sentiment,
            class_value,
            class_name,
            confidence: proba[index],
            probabilities,
        })
    }

    pub fn info(&self) -> BundleInfo {
        BundleInfo {
            vocabulary_size: self.vectorizer.vocabulary_len(),
            n_features: self.vectorizer.n_features(),
            ngram_range: self.vectorizer.ngram_range(),
            classes: self.model.classes().to_vec(),
            class_names: self.label_encoder.classes.clone(),
        }
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading artifact: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        SentimentError::StartupConfiguration(format!("cannot read '{}': {}", path.display(), e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SentimentError::StartupConfiguration(format!("cannot parse '{}': {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::classifier::MultiClass;
    use crate::processing::vectorizer::Norm;
    use approx::assert_relative_eq;

    fn vectorizer(terms: &[&str]) -> TfidfVectorizer {
        TfidfVectorizer::from_artifact(VectorizerArtifact {
            vocabulary: terms.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect(),
            idf: vec![1.0; terms.len()],
            ngram_range: (1, 1),
            norm: Some(Norm::L2),
            sublinear_tf: false,
            lowercase: true,
            stop_words: Vec::new(),
            token_pattern: r"(?u)\b\w\w+\b".to_string(),
        })
        .unwrap()
    }

    fn model(classes: Vec<i64>) -> LogisticModel {
        LogisticModel::from_artifact(LogisticArtifact {
            coef: vec![
                vec![3.0, 0.0, 0.0],
                vec![0.0, 3.0, 0.0],
                vec![0.0, 0.0, 3.0],
            ],
            intercept: vec![0.0, 0.1, 0.0],
            classes,
            multi_class: MultiClass::Multinomial,
        })
        .unwrap()
    }

    fn encoder() -> LabelEncoder {
        LabelEncoder {
            classes: vec!["negative".into(), "neutral".into(), "positive".into()],
        }
    }

    fn bundle() -> ClassifierBundle {
        ClassifierBundle::from_parts(vectorizer(&["awful", "okay", "lovely"]), model(vec![0, 1, 2]), encoder()).unwrap()
    }

    #[test]
    fn test_predict_maps_through_label_table() {
        let bundle = bundle();

        let prediction = bundle.predict("lovely lovely room").unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Positive);
        assert_eq!(prediction.class_value, 2);
        assert_eq!(prediction.class_name, "positive");

        assert_eq!(bundle.predict("awful").unwrap().sentiment, Sentiment::Negative);
        assert_eq!(bundle.predict("unknown words only").unwrap().sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_probabilities_cover_every_label() {
        let prediction = bundle().predict("okay").unwrap();
        assert_eq!(prediction.probabilities.len(), 3);

        let total: f64 = prediction.probabilities.iter().map(|p| p.probability).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
        assert!(prediction.confidence > 1.0 / 3.0);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let bundle = bundle();
        let first = bundle.predict("lovely but awful").unwrap();
        for _ in 0..5 {
            assert_eq!(bundle.predict("lovely but awful").unwrap(), first);
        }
    }

    #[test]
    fn test_feature_width_mismatch() {
        let result = ClassifierBundle::from_parts(vectorizer(&["awful", "okay"]), model(vec![0, 1, 2]), encoder());
        assert!(matches!(result, Err(SentimentError::StartupConfiguration(_))));
    }

    #[test]
    fn test_class_outside_label_table() {
        let result = ClassifierBundle::from_parts(vectorizer(&["awful", "okay", "lovely"]), model(vec![0, 1, 5]), encoder());
        assert!(matches!(result, Err(SentimentError::StartupConfiguration(_))));
    }

    #[test]
    fn test_missing_artifact_is_startup_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("tfidf_vectorizer.json");
        let result = ClassifierBundle::load_from_paths(&missing, &missing, &missing);
        assert!(matches!(result, Err(SentimentError::StartupConfiguration(_))));
    }
}

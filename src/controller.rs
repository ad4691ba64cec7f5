//! Submission handling: resolve the review text, guard its length, classify

use crate::error::{Result, SentimentError};
use crate::input::file_detector::FileType;
use crate::input::manager::{display_name, InputManager};
use crate::processing::bundle::{ClassifierBundle, Prediction};
use crate::processing::normalizer::{token_count, TextNormalizer};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One user submission: an uploaded file, typed text, or both
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub file: Option<PathBuf>,
    pub text: String,
}

impl Submission {
    pub fn typed(text: impl Into<String>) -> Self {
        Self {
            file: None,
            text: text.into(),
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            text: String::new(),
        }
    }
}

/// Where the classified text came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReviewSource {
    Typed,
    File { name: String, file_type: FileType },
}

/// A classified submission, ready to render
#[derive(Debug, Clone)]
pub struct Assessment {
    pub source: ReviewSource,
    pub review_text: String,
    pub normalized: String,
    pub token_count: usize,
    pub prediction: Prediction,
}

pub struct ReviewController<'a> {
    bundle: &'a ClassifierBundle,
    inputs: InputManager,
    normalizer: TextNormalizer,
    min_tokens: usize,
}

impl<'a> ReviewController<'a> {
    pub fn new(bundle: &'a ClassifierBundle, min_tokens: usize) -> Self {
        Self {
            bundle,
            inputs: InputManager::new(),
            normalizer: TextNormalizer::new(),
            min_tokens,
        }
    }

    pub fn min_tokens(&self) -> usize {
        self.min_tokens
    }

    /// Handle one submission start to finish.
    ///
    /// A supplied file takes precedence over typed text.
    pub async fn submit(&self, submission: &Submission) -> Result<Assessment> {
        let (source, review_text) = match &submission.file {
            Some(path) => {
                let text = self.inputs.extract_file(path).await?;
                let source = ReviewSource::File {
                    name: display_name(path),
                    file_type: FileType::from_path(path),
                };
                (source, text)
            }
            None => (ReviewSource::Typed, submission.text.trim().to_string()),
        };

        self.assess(source, review_text)
    }

    /// Apply the length guard, normalize and classify.
    pub fn assess(&self, source: ReviewSource, review_text: String) -> Result<Assessment> {
        let tokens = token_count(&review_text);
        if tokens < self.min_tokens {
            warn!("Rejected review with {} words (minimum {})", tokens, self.min_tokens);
            return Err(SentimentError::InsufficientInput {
                required: self.min_tokens,
                found: tokens,
            });
        }

        let normalized = self.normalizer.normalize(&review_text);
        let prediction = self.bundle.predict(&normalized)?;
        info!(
            "Predicted {} (class {}, confidence {:.3})",
            prediction.sentiment, prediction.class_value, prediction.confidence
        );

        Ok(Assessment {
            source,
            review_text,
            normalized,
            token_count: tokens,
            prediction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::sentiment::Sentiment;
    use std::path::Path;

    fn fixture_bundle() -> ClassifierBundle {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/models");
        ClassifierBundle::load_from_paths(
            &dir.join("tfidf_vectorizer.json"),
            &dir.join("logistic_model.json"),
            &dir.join("label_encoder.json"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_typed_review_is_classified() {
        let bundle = fixture_bundle();
        let controller = ReviewController::new(&bundle, 3);

        let assessment = controller.submit(&Submission::typed("Great stay, loved it!")).await.unwrap();
        assert_eq!(assessment.source, ReviewSource::Typed);
        assert_eq!(assessment.normalized, "great stay loved it");
        assert_eq!(assessment.token_count, 4);
        assert_eq!(assessment.prediction.sentiment, Sentiment::Positive);
    }

    #[tokio::test]
    async fn test_short_review_rejected() {
        let bundle = fixture_bundle();
        let controller = ReviewController::new(&bundle, 3);

        let err = controller.submit(&Submission::typed("ok")).await.unwrap_err();
        assert!(matches!(err, SentimentError::InsufficientInput { required: 3, found: 1 }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_empty_typed_text_rejected() {
        let bundle = fixture_bundle();
        let controller = ReviewController::new(&bundle, 3);

        let err = controller.submit(&Submission::default()).await.unwrap_err();
        assert!(matches!(err, SentimentError::InsufficientInput { found: 0, .. }));
    }

    #[tokio::test]
    async fn test_unsupported_file_wins_over_text() {
        let bundle = fixture_bundle();
        let controller = ReviewController::new(&bundle, 3);

        let submission = Submission {
            file: Some(PathBuf::from("notes.rtf")),
            text: "Great stay, loved it!".to_string(),
        };
        let err = controller.submit(&submission).await.unwrap_err();
        assert!(matches!(err, SentimentError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_guard_counts_raw_tokens_not_normalized_ones() {
        let bundle = fixture_bundle();
        let controller = ReviewController::new(&bundle, 3);

        // three tokens pass the guard even though nothing survives normalization
        let assessment = controller.assess(ReviewSource::Typed, "123 456 789".to_string()).unwrap();
        assert_eq!(assessment.normalized, "");
        assert_eq!(assessment.prediction.sentiment, Sentiment::Neutral);
    }
}

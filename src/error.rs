//! Error handling for the hotel sentiment analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Classifier bundle unavailable: {0}")]
    StartupConfiguration(String),

    #[error("Unsupported file format: {0}. Please upload PDF, TXT or DOCX.")]
    UnsupportedFormat(String),

    #[error("Could not decode text: {0}")]
    Decode(String),

    #[error("Error reading file: {0}")]
    Extraction(String),

    #[error("Please enter a more detailed review (at least {required} words, got {found})")]
    InsufficientInput { required: usize, found: usize },

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl SentimentError {
    /// Whether the error is a user-facing input problem after which the
    /// controller can accept the next submission.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SentimentError::Io(_)
                | SentimentError::UnsupportedFormat(_)
                | SentimentError::Decode(_)
                | SentimentError::Extraction(_)
                | SentimentError::InsufficientInput { .. }
                | SentimentError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SentimentError>;

//! Decoder from encoded class values back to training label names

use crate::error::{Result, SentimentError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Training label names, indexed by encoded class value
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(SentimentError::StartupConfiguration(
                "label encoder has no classes".to_string(),
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn inverse_transform(&self, class_value: i64) -> Option<&str> {
        usize::try_from(class_value)
            .ok()
            .and_then(|i| self.classes.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_transform() {
        let encoder = LabelEncoder {
            classes: vec!["negative".into(), "neutral".into(), "positive".into()],
        };
        assert_eq!(encoder.inverse_transform(0), Some("negative"));
        assert_eq!(encoder.inverse_transform(2), Some("positive"));
        assert_eq!(encoder.inverse_transform(3), None);
        assert_eq!(encoder.inverse_transform(-1), None);
    }

    #[test]
    fn test_empty_encoder_is_invalid() {
        let encoder = LabelEncoder { classes: Vec::new() };
        assert!(matches!(encoder.validate(), Err(SentimentError::StartupConfiguration(_))));
    }
}

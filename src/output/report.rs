//! Prediction report rendered by the output formatters

use crate::controller::{Assessment, ReviewSource};
use crate::processing::bundle::LabelProbability;
use crate::processing::sentiment::{LabelColor, Sentiment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

const EXCERPT_GRAPHEMES: usize = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    /// Display label, e.g. "Positive Review"
    pub label: String,
    pub sentiment: Sentiment,
    pub glyph: String,
    pub color: LabelColor,
    /// Balloons are reserved for positive reviews
    pub celebrate: bool,

    pub class_value: i64,
    pub class_name: String,
    pub confidence: f64,
    pub probabilities: Vec<LabelProbability>,

    pub source: ReviewSource,
    pub token_count: usize,
    pub excerpt: String,
    pub normalized_text: String,

    pub generated_at: DateTime<Utc>,
}

impl PredictionReport {
    pub fn from_assessment(assessment: &Assessment) -> Self {
        let sentiment = assessment.prediction.sentiment;

        Self {
            label: sentiment.display_name().to_string(),
            sentiment,
            glyph: sentiment.glyph().to_string(),
            color: sentiment.color(),
            celebrate: sentiment.celebrates(),
            class_value: assessment.prediction.class_value,
            class_name: assessment.prediction.class_name.clone(),
            confidence: assessment.prediction.confidence,
            probabilities: assessment.prediction.probabilities.clone(),
            source: assessment.source.clone(),
            token_count: assessment.token_count,
            excerpt: excerpt(&assessment.review_text, EXCERPT_GRAPHEMES),
            normalized_text: assessment.normalized.clone(),
            generated_at: Utc::now(),
        }
    }

    pub fn source_description(&self) -> String {
        match &self.source {
            ReviewSource::Typed => "typed review".to_string(),
            ReviewSource::File { name, file_type } => format!("{} ({})", name, file_type),
        }
    }
}

/// First `max_graphemes` user-perceived characters, on a word boundary when possible
pub fn excerpt(text: &str, max_graphemes: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.graphemes(true).count() <= max_graphemes {
        return collapsed;
    }

    let truncated: String = collapsed.graphemes(true).take(max_graphemes).collect();
    let cut = truncated.rfind(' ').unwrap_or(truncated.len());
    format!("{}...", &truncated[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::bundle::Prediction;

    fn assessment(sentiment: Sentiment) -> Assessment {
        Assessment {
            source: ReviewSource::Typed,
            review_text: "Great stay, loved it!".to_string(),
            normalized: "great stay loved it".to_string(),
            token_count: 4,
            prediction: Prediction {
                sentiment,
                class_value: sentiment.class_value(),
                class_name: format!("{:?}", sentiment).to_lowercase(),
                confidence: 0.8,
                probabilities: Vec::new(),
            },
        }
    }

    #[test]
    fn test_report_from_positive_assessment() {
        let report = PredictionReport::from_assessment(&assessment(Sentiment::Positive));
        assert_eq!(report.label, "Positive Review");
        assert_eq!(report.glyph, "✅");
        assert_eq!(report.color, LabelColor::Green);
        assert!(report.celebrate);
        assert_eq!(report.source_description(), "typed review");
    }

    #[test]
    fn test_non_positive_reports_do_not_celebrate() {
        assert!(!PredictionReport::from_assessment(&assessment(Sentiment::Negative)).celebrate);
        assert!(!PredictionReport::from_assessment(&assessment(Sentiment::Neutral)).celebrate);
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short\n\nreview", 50), "short review");
        assert_eq!(excerpt("the breakfast buffet was superb", 20), "the breakfast...");
        // multi-byte graphemes are never split
        assert_eq!(excerpt("🏨🏨🏨🏨", 2), "🏨🏨...");
    }
}

//! The fixed sentiment label table

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

/// Display color of a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Red,
    Orange,
    Green,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// 0 → Negative, 1 → Neutral, 2 → Positive
    pub fn from_class(class_value: i64) -> Option<Self> {
        match class_value {
            0 => Some(Sentiment::Negative),
            1 => Some(Sentiment::Neutral),
            2 => Some(Sentiment::Positive),
            _ => None,
        }
    }

    pub fn class_value(&self) -> i64 {
        match self {
            Sentiment::Negative => 0,
            Sentiment::Neutral => 1,
            Sentiment::Positive => 2,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative Review",
            Sentiment::Neutral => "Neutral Review",
            Sentiment::Positive => "Positive Review",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Sentiment::Negative => "❌",
            Sentiment::Neutral => "😐",
            Sentiment::Positive => "✅",
        }
    }

    pub fn color(&self) -> LabelColor {
        match self {
            Sentiment::Negative => LabelColor::Red,
            Sentiment::Neutral => LabelColor::Orange,
            Sentiment::Positive => LabelColor::Green,
        }
    }

    /// Only positive reviews get the balloons
    pub fn celebrates(&self) -> bool {
        matches!(self, Sentiment::Positive)
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl LabelColor {
    /// CSS color name
    pub fn css_name(&self) -> &'static str {
        match self {
            LabelColor::Red => "red",
            LabelColor::Orange => "orange",
            LabelColor::Green => "green",
        }
    }

    pub fn terminal_color(&self) -> colored::Color {
        match self {
            LabelColor::Red => colored::Color::Red,
            LabelColor::Orange => colored::Color::TrueColor { r: 255, g: 165, b: 0 },
            LabelColor::Green => colored::Color::Green,
        }
    }
}

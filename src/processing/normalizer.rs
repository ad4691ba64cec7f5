//! Text normalization applied before classification

use regex::Regex;

/// Whitespace as the training pipeline saw it: Unicode whitespace plus the
/// ASCII information separators U+001C..=U+001F.
const WHITESPACE_CLASS: &str = r"\s\x1c-\x1f";

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub struct TextNormalizer {
    non_alpha_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let non_alpha_regex =
            Regex::new(&format!("[^a-z{}]", WHITESPACE_CLASS)).expect("Invalid non-alphabetic regex");
        let whitespace_regex =
            Regex::new(&format!("[{}]+", WHITESPACE_CLASS)).expect("Invalid whitespace regex");

        Self {
            non_alpha_regex,
            whitespace_regex,
        }
    }

    /// Lower-case, keep only `a-z` and whitespace, collapse whitespace runs
    /// into a single space and trim.
    ///
    /// The result only contains `[a-z ]`, never two spaces in a row, and no
    /// leading or trailing space, so normalizing twice changes nothing.
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let letters = self.non_alpha_regex.replace_all(&lowered, "");
        self.whitespace_regex.replace_all(&letters, " ").trim().to_string()
    }
}

/// Number of whitespace-separated tokens in `text`.
pub fn token_count(text: &str) -> usize {
    text.split(is_separator).filter(|token| !token.is_empty()).count()
}

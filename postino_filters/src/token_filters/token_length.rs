use hashbrown::HashSet;
use postino::Document;

use crate::TokenFilter;

/// Token length filter. Drops tokens whose character length falls outside a
/// range: stray single letters and runaway concatenations are noise in a
/// bag-of-words corpus.
pub struct TokenLengthFilter {
    min: usize,
    max: usize,
    keep: HashSet<String>,
}

impl TokenLengthFilter {
    /// Creates a new TokenLengthFilter retaining tokens of `min..=max`
    /// characters.
    ///
    /// # Arguments
    ///
    /// * `min` - Minimum token length, in characters.
    /// * `max` - Maximum token length, in characters.
    ///
    /// # Returns
    ///
    /// A new TokenLengthFilter.
    pub fn new(min: usize, max: usize) -> Self {
        Self {
            min,
            max,
            keep: HashSet::new(),
        }
    }

    /// Exempts a token from the length check.
    pub fn keep<S>(mut self, token: S) -> Self
    where
        S: Into<String>,
    {
        self.keep.insert(token.into());
        self
    }
}

impl TokenFilter for TokenLengthFilter {
    /// Drops out-of-range tokens.
    ///
    /// # Arguments
    ///
    /// * `document` - Input document.
    ///
    /// # Returns
    ///
    /// A processed document.
    fn filter(&self, document: Document) -> Document {
        let tokens = document
            .into_tokens()
            .into_iter()
            .filter(|token| {
                if self.keep.contains(token.as_str()) {
                    return true;
                }
                let len = token.chars().count();
                self.min <= len && len <= self.max
            })
            .collect();
        Document::from_tokens(tokens)
    }
}

use postino::Document;

use crate::TokenFilter;

/// Token pair joiner. Rejoins a word that the upstream tokenizer split into
/// two adjacent tokens, e.g. "e" "mail" back into "email".
pub struct JoinAdjacentFilter {
    first: String,
    second: String,
    joined: String,
}

impl JoinAdjacentFilter {
    /// Creates a new JoinAdjacentFilter.
    ///
    /// # Arguments
    ///
    /// * `first` - First token of the split pair.
    /// * `second` - Second token of the split pair.
    /// * `joined` - Replacement token.
    ///
    /// # Returns
    ///
    /// A new JoinAdjacentFilter.
    pub fn new<S>(first: S, second: S, joined: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            first: first.into(),
            second: second.into(),
            joined: joined.into(),
        }
    }
}

impl TokenFilter for JoinAdjacentFilter {
    /// Replaces each adjacent `first second` pair with `joined`.
    ///
    /// # Arguments
    ///
    /// * `document` - Input document.
    ///
    /// # Returns
    ///
    /// A processed document.
    fn filter(&self, document: Document) -> Document {
        let tokens = document.into_tokens();
        let mut result = Vec::with_capacity(tokens.len());
        let mut iter = tokens.into_iter().peekable();
        while let Some(token) = iter.next() {
            if token == self.first && iter.peek() == Some(&self.second) {
                iter.next();
                result.push(self.joined.clone());
            } else {
                result.push(token);
            }
        }
        Document::from_tokens(result)
    }
}

//! Tokenized documents.

/// An ordered sequence of word tokens.
///
/// A document is never mutated after construction. The classifier treats it
/// as a bag of words; the token order is preserved for callers that need it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    tokens: Vec<String>,
}

impl Document {
    /// Creates a document from a token sequence.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// Creates a document from a line of whitespace-separated tokens.
    ///
    /// This matches the corpus layout: one file per document, holding a
    /// single line with no trailing structure.
    ///
    /// # Arguments
    ///
    /// * `line` - Input line.
    ///
    /// # Returns
    ///
    /// A new document. An empty or all-whitespace line produces an empty
    /// document, which is still classifiable.
    pub fn from_line(line: &str) -> Self {
        Self {
            tokens: line.split_whitespace().map(|t| t.to_string()).collect(),
        }
    }

    /// Returns the tokens of this document.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Consumes the document and returns its tokens.
    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

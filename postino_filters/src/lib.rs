//! Token-stream filters for Postino.
//!
//! These filters clean a corpus up front: undoing tokenizer artifacts and
//! dropping tokens that carry no signal. The same filter chain must run at
//! training and classification time, otherwise the model and the scored
//! documents disagree on what a word looks like.

pub mod token_filters;

use postino::Document;

/// Trait of filters rewriting the token stream of a document.
pub trait TokenFilter {
    /// Filters a document.
    ///
    /// # Arguments
    ///
    /// * `document` - Input document.
    ///
    /// # Returns
    ///
    /// A processed document.
    fn filter(&self, document: Document) -> Document;
}

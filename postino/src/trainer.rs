//! Aggregation of a labeled corpus into a model.

use std::collections::BTreeMap;
use std::num::NonZeroU64;

use crate::corpus::Corpus;
use crate::errors::{PostinoError, Result};
use crate::model::{ClassModel, Model, ModelMeta};

/// Trainer.
///
/// Counts word occurrences per class over a labeled corpus and assembles a
/// [`Model`]. Training is a pure function of the corpus: no I/O, no state
/// kept between calls.
///
/// # Examples
///
/// ```
/// use postino::{Corpus, Document, Trainer};
///
/// let mut corpus = Corpus::new();
/// corpus.add_document("spam", Document::from_line("buy now buy"));
/// corpus.add_document("ham", Document::from_line("hello friend"));
///
/// let model = Trainer::new().train(&corpus).unwrap();
/// assert_eq!(2, model.total_document_count());
/// ```
#[derive(Debug, Default)]
pub struct Trainer {
    vocabulary_limit: Option<NonZeroU64>,
    model_name: Option<String>,
}

impl Trainer {
    /// Creates a new trainer with an unlimited vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps every class vocabulary at `limit` words, keeping the most
    /// frequent. Ties among equal counts keep the lexicographically smaller
    /// word, so repeated runs over the same corpus produce the same model.
    pub fn vocabulary_limit(mut self, limit: NonZeroU64) -> Self {
        self.vocabulary_limit = Some(limit);
        self
    }

    /// Sets a name to record in the model metadata.
    pub fn model_name<S>(mut self, name: S) -> Self
    where
        S: Into<String>,
    {
        self.model_name = Some(name.into());
        self
    }

    /// Trains a model from a labeled corpus.
    ///
    /// # Arguments
    ///
    /// * `corpus` - Documents grouped by class name. The class order of the
    ///   corpus becomes the class order of the model.
    ///
    /// # Returns
    ///
    /// A trained model.
    ///
    /// # Errors
    ///
    /// [`PostinoError::InvalidCorpus`] will be returned if the corpus has no
    /// classes or any class has no documents; either would leave a class
    /// prior of zero, whose logarithm is undefined.
    pub fn train(&self, corpus: &Corpus) -> Result<Model> {
        if corpus.is_empty() {
            return Err(PostinoError::invalid_corpus("corpus contains no classes"));
        }

        let mut classes = Vec::with_capacity(corpus.n_classes());
        for (class_name, documents) in corpus.classes() {
            if documents.is_empty() {
                return Err(PostinoError::invalid_corpus(format!(
                    "class {} has no documents",
                    class_name
                )));
            }
            let mut word_counts = BTreeMap::new();
            let mut total_word_count = 0;
            for document in documents {
                for word in document.tokens() {
                    *word_counts.entry(word.clone()).or_insert(0) += 1;
                    total_word_count += 1;
                }
            }
            classes.push(ClassModel {
                class_name: class_name.to_string(),
                document_count: documents.len() as u64,
                total_word_count,
                word_counts,
            });
        }

        let mut model = Model {
            total_vocabulary_size: classes.iter().map(|c| c.vocabulary_size()).sum(),
            total_document_count: classes.iter().map(|c| c.document_count()).sum(),
            classes,
            meta: Some(ModelMeta {
                name: self.model_name.clone(),
                vocabulary_limit: None,
            }),
        };
        if let Some(limit) = self.vocabulary_limit {
            model.truncate_vocabulary(limit);
        }
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    fn two_class_corpus() -> Corpus {
        let mut corpus = Corpus::new();
        corpus.add_document("spam", Document::from_line("buy now buy"));
        corpus.add_document("ham", Document::from_line("hello friend"));
        corpus
    }

    #[test]
    fn test_train_counts() {
        let model = Trainer::new().train(&two_class_corpus()).unwrap();

        let spam = &model.classes()[0];
        assert_eq!("spam", spam.class_name());
        assert_eq!(1, spam.document_count());
        assert_eq!(2, spam.word_counts()["buy"]);
        assert_eq!(1, spam.word_counts()["now"]);
        assert_eq!(3, spam.total_word_count());

        let ham = &model.classes()[1];
        assert_eq!("ham", ham.class_name());
        assert_eq!(2, ham.total_word_count());

        assert_eq!(4, model.total_vocabulary_size());
        assert_eq!(2, model.total_document_count());
        model.validate().unwrap();
    }

    #[test]
    fn test_train_counts_across_documents() {
        let mut corpus = Corpus::new();
        corpus.add_document("spam", Document::from_line("buy now"));
        corpus.add_document("spam", Document::from_line("buy cheap"));
        corpus.add_document("ham", Document::from_line("hello"));
        let model = Trainer::new().train(&corpus).unwrap();

        let spam = &model.classes()[0];
        assert_eq!(2, spam.document_count());
        assert_eq!(2, spam.word_counts()["buy"]);
        assert_eq!(4, spam.total_word_count());
        assert_eq!(3, model.total_document_count());
    }

    #[test]
    fn test_train_empty_corpus() {
        let e = Trainer::new().train(&Corpus::new());
        assert_eq!(
            "CorpusError: corpus contains no classes",
            &e.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_train_class_without_documents() {
        let mut corpus = Corpus::new();
        corpus.add_document("spam", Document::from_line("buy"));
        corpus.add_class("ham").unwrap();
        let e = Trainer::new().train(&corpus);
        assert_eq!(
            "CorpusError: class ham has no documents",
            &e.err().unwrap().to_string()
        );
    }

    #[test]
    fn test_train_vocabulary_limit() {
        let mut corpus = Corpus::new();
        corpus.add_document("spam", Document::from_line("a a a a a b b b c"));
        corpus.add_document("ham", Document::from_line("z"));
        let model = Trainer::new()
            .vocabulary_limit(NonZeroU64::new(1).unwrap())
            .train(&corpus)
            .unwrap();

        let spam = &model.classes()[0];
        assert_eq!(1, spam.vocabulary_size());
        assert_eq!(5, spam.word_counts()["a"]);
        // Truncated words do not contribute to the total.
        assert_eq!(5, spam.total_word_count());
        assert_eq!(2, model.total_vocabulary_size());
        assert_eq!(
            NonZeroU64::new(1),
            model.meta().unwrap().vocabulary_limit
        );
        model.validate().unwrap();
    }

    #[test]
    fn test_train_model_name() {
        let model = Trainer::new()
            .model_name("enron")
            .train(&two_class_corpus())
            .unwrap();
        assert_eq!(Some("enron"), model.meta().unwrap().name.as_deref());
        assert_eq!(None, model.meta().unwrap().vocabulary_limit);
    }

    #[test]
    fn test_train_preserves_class_order() {
        let mut corpus = Corpus::new();
        corpus.add_document("zebra", Document::from_line("z"));
        corpus.add_document("aardvark", Document::from_line("a"));
        let model = Trainer::new().train(&corpus).unwrap();
        assert_eq!("zebra", model.classes()[0].class_name());
        assert_eq!("aardvark", model.classes()[1].class_name());
    }

    #[test]
    fn test_train_twice_is_identical() {
        let corpus = two_class_corpus();
        let trainer = Trainer::new();
        let mut a = vec![];
        let mut b = vec![];
        trainer.train(&corpus).unwrap().write(&mut a).unwrap();
        trainer.train(&corpus).unwrap().write(&mut b).unwrap();
        assert_eq!(a, b);
    }
}

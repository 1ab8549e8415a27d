//! Labeled document collections.

use hashbrown::HashMap;

use crate::document::Document;
use crate::errors::{PostinoError, Result};

/// A labeled corpus: document collections grouped by class name.
///
/// Classes keep their insertion order. The order is observable downstream:
/// it fixes the class order of trained models and therefore which class wins
/// an exact score tie during classification.
#[derive(Debug, Default)]
pub struct Corpus {
    ids: HashMap<String, usize>,
    classes: Vec<CorpusClass>,
}

#[derive(Debug)]
struct CorpusClass {
    name: String,
    documents: Vec<Document>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class with no documents.
    ///
    /// Classes are also created implicitly by [`Corpus::add_document`]; this
    /// is for callers that enumerate classes up front, so that a class left
    /// empty is still visible to the trainer (and rejected there).
    ///
    /// # Errors
    ///
    /// [`PostinoError::InvalidArgument`] will be returned if the class is
    /// already registered.
    pub fn add_class<S>(&mut self, class_name: S) -> Result<()>
    where
        S: Into<String>,
    {
        let class_name = class_name.into();
        if self.ids.contains_key(&class_name) {
            return Err(PostinoError::invalid_argument(
                "class_name",
                format!("duplicate class: {}", class_name),
            ));
        }
        self.class_id(class_name);
        Ok(())
    }

    /// Adds a document to a class, creating the class on first use.
    pub fn add_document<S>(&mut self, class_name: S, document: Document)
    where
        S: Into<String>,
    {
        let id = self.class_id(class_name.into());
        self.classes[id].documents.push(document);
    }

    fn class_id(&mut self, class_name: String) -> usize {
        if let Some(&id) = self.ids.get(&class_name) {
            id
        } else {
            let id = self.classes.len();
            self.ids.insert(class_name.clone(), id);
            self.classes.push(CorpusClass {
                name: class_name,
                documents: vec![],
            });
            id
        }
    }

    /// Iterates over classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &[Document])> {
        self.classes
            .iter()
            .map(|c| (c.name.as_str(), c.documents.as_slice()))
    }

    /// Returns the number of classes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Returns the total number of documents across all classes.
    pub fn n_documents(&self) -> usize {
        self.classes.iter().map(|c| c.documents.len()).sum()
    }

    /// Returns `true` if the corpus has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

//! # Postino
//!
//! Postino is a small multinomial Naive Bayes classifier for bag-of-words
//! documents, built for spam filtering but agnostic to the number of
//! classes. Training aggregates per-class word counts from a labeled corpus
//! into a JSON model artifact; classification scores a document against
//! every class in log-probability space with add-one smoothing and returns
//! the best class.
//!
//! # Examples
//!
//! Training:
//!
//! ```
//! use postino::{Corpus, Document, Trainer};
//!
//! let mut corpus = Corpus::new();
//! corpus.add_document("spam", Document::from_line("buy now buy"));
//! corpus.add_document("ham", Document::from_line("hello friend"));
//!
//! let model = Trainer::new().model_name("example").train(&corpus).unwrap();
//! let mut artifact = vec![];
//! model.write(&mut artifact).unwrap();
//! ```
//!
//! Classification:
//!
//! ```no_run
//! use postino::{Classifier, Document, Model};
//!
//! let model = Model::from_path("model.json").unwrap();
//! let classifier = Classifier::new(&model).unwrap();
//! let decision = classifier.classify(&Document::from_line("buy buy"));
//! assert_eq!("spam", decision.class_name);
//! ```

pub mod errors;

mod classifier;
mod corpus;
mod document;
mod model;
mod trainer;

pub use classifier::{ClassAccuracy, Classifier, Decision};
pub use corpus::Corpus;
pub use document::Document;
pub use errors::{PostinoError, Result};
pub use model::{ClassModel, Model, ModelMeta};
pub use trainer::Trainer;

//! Scoring documents against a trained model.

use hashbrown::HashMap;

use crate::corpus::Corpus;
use crate::document::Document;
use crate::errors::Result;
use crate::model::Model;

/// The outcome of classifying one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    /// Name of the winning class.
    pub class_name: String,

    /// Raw score of the winning class: a sum of log probabilities, so
    /// always zero or negative. Scores are only comparable against other
    /// classes of the same model for the same document.
    pub score: f64,
}

/// Per-class accuracy over a labeled test set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassAccuracy {
    /// Name of the test class.
    pub class_name: String,

    /// Documents of this class that were classified back to it.
    pub correct: usize,

    /// Total documents of this class in the test set.
    pub total: usize,
}

struct ClassScorer {
    class_name: String,
    log_prior: f64,
    word_log_probs: HashMap<String, f64>,
}

/// Classifier.
///
/// Holds the scoring tables derived from a [`Model`]: per class, the log
/// prior and the add-one smoothed log conditional probability of every
/// retained word. The tables are computed once and never mutated, so a
/// classifier can be shared freely across threads scoring independent
/// documents.
///
/// # Examples
///
/// ```no_run
/// use postino::{Classifier, Document, Model};
///
/// let model = Model::from_path("model.json").unwrap();
/// let classifier = Classifier::new(&model).unwrap();
///
/// let decision = classifier.classify(&Document::from_line("buy now"));
/// println!("{}\t{}", decision.class_name, decision.score);
/// ```
pub struct Classifier {
    classes: Vec<ClassScorer>,
}

impl Classifier {
    /// Creates a new classifier from a model.
    ///
    /// # Arguments
    ///
    /// * `model` - A trained model.
    ///
    /// # Errors
    ///
    /// [`PostinoError::InvalidModel`](crate::PostinoError::InvalidModel)
    /// will be returned if the model violates an invariant. Validation
    /// happens here, before any probability is derived, so a corrupt
    /// artifact can never feed a non-finite value into a score.
    pub fn new(model: &Model) -> Result<Self> {
        model.validate()?;

        let total_document_count = model.total_document_count() as f64;
        let total_vocabulary_size = model.total_vocabulary_size();
        let mut classes = Vec::with_capacity(model.classes().len());
        for class in model.classes() {
            let log_prior = (class.document_count() as f64 / total_document_count).ln();
            let denominator = (class.total_word_count() + total_vocabulary_size) as f64;
            let mut word_log_probs = HashMap::with_capacity(class.word_counts().len());
            for (word, &count) in class.word_counts() {
                word_log_probs.insert(word.clone(), ((count + 1) as f64 / denominator).ln());
            }
            classes.push(ClassScorer {
                class_name: class.class_name().to_string(),
                log_prior,
                word_log_probs,
            });
        }
        Ok(Self { classes })
    }

    /// Classifies a document.
    ///
    /// Each class is scored as its log prior plus the log conditional
    /// probabilities of the document's recognized words; words a class has
    /// never seen are skipped for that class, neither penalized nor mapped
    /// to an unknown token. Every recognized word deepens the score, so the
    /// class whose accumulated word evidence is strongest (the largest
    /// log-score magnitude) wins. When no class recognizes any token, which
    /// includes the empty document, there is no word evidence at all and
    /// the decision falls back to the class with the highest prior. An
    /// exact tie resolves to the class listed first in the model.
    ///
    /// # Arguments
    ///
    /// * `document` - A tokenized document. May be empty.
    ///
    /// # Returns
    ///
    /// The winning class and its raw score.
    pub fn classify(&self, document: &Document) -> Decision {
        let mut any_recognized = false;
        let mut scores = Vec::with_capacity(self.classes.len());
        for scorer in &self.classes {
            let (score, recognized) = Self::score(scorer, document);
            any_recognized |= recognized > 0;
            scores.push(score);
        }

        // Strict comparisons: an exact tie keeps the earlier class. With no
        // recognized word anywhere, every score equals its class prior and
        // the prior-only comparison flips to prefer the likelier class.
        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            let better = if any_recognized {
                score < scores[best]
            } else {
                score > scores[best]
            };
            if better {
                best = i;
            }
        }
        Decision {
            class_name: self.classes[best].class_name.clone(),
            score: scores[best],
        }
    }

    fn score(scorer: &ClassScorer, document: &Document) -> (f64, usize) {
        let mut score = scorer.log_prior;
        let mut recognized = 0;
        for word in document.tokens() {
            if let Some(log_prob) = scorer.word_log_probs.get(word.as_str()) {
                score += log_prob;
                recognized += 1;
            }
        }
        (score, recognized)
    }

    /// Computes per-class accuracy over a labeled test set.
    ///
    /// # Arguments
    ///
    /// * `test_set` - Documents grouped by their known class.
    ///
    /// # Returns
    ///
    /// One entry per test class, in the test set's class order: how many of
    /// its documents were classified back to it, and how many there were.
    pub fn evaluate(&self, test_set: &Corpus) -> Vec<ClassAccuracy> {
        test_set
            .classes()
            .map(|(class_name, documents)| {
                let correct = documents
                    .iter()
                    .filter(|doc| self.classify(doc).class_name == class_name)
                    .count();
                ClassAccuracy {
                    class_name: class_name.to_string(),
                    correct,
                    total: documents.len(),
                }
            })
            .collect()
    }
}

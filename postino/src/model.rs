//! Model data and JSON (de)serialization.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};
use std::num::NonZeroU64;
use std::path::Path;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::errors::{PostinoError, Result};

/// Word frequency counts of a single class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassModel {
    pub(crate) class_name: String,

    #[serde(rename = "class_document_count")]
    pub(crate) document_count: u64,

    pub(crate) total_word_count: u64,

    // BTreeMap keeps the serialized artifact byte-stable across runs.
    pub(crate) word_counts: BTreeMap<String, u64>,
}

impl ClassModel {
    /// Returns the class name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns the number of training documents of this class.
    pub fn document_count(&self) -> u64 {
        self.document_count
    }

    /// Returns the sum of all retained word counts.
    pub fn total_word_count(&self) -> u64 {
        self.total_word_count
    }

    /// Returns the per-word occurrence counts.
    pub fn word_counts(&self) -> &BTreeMap<String, u64> {
        &self.word_counts
    }

    /// Returns the number of distinct retained words.
    pub fn vocabulary_size(&self) -> u64 {
        self.word_counts.len() as u64
    }

    fn truncate(&mut self, limit: NonZeroU64) {
        let limit = usize::try_from(limit.get()).unwrap_or(usize::MAX);
        if self.word_counts.len() <= limit {
            return;
        }
        let mut entries: Vec<_> = std::mem::take(&mut self.word_counts).into_iter().collect();
        // Highest counts first; ties resolve to the lexicographically
        // smaller word so repeated runs keep the same vocabulary.
        entries.sort_unstable_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)));
        entries.truncate(limit);
        self.total_word_count = entries.iter().map(|(_, count)| count).sum();
        self.word_counts = entries.into_iter().collect();
    }
}

/// Optional artifact metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The per-class vocabulary cap applied during training, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_limit: Option<NonZeroU64>,
}

/// Model data: per-class word counts and corpus-wide totals.
///
/// A model is built once by [`Trainer::train`](crate::Trainer::train),
/// immutable in normal use, persisted as a JSON document, and loaded
/// read-only by [`Classifier::new`](crate::Classifier::new). The serialized
/// field names are a compatibility contract between writer and reader and
/// must never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    #[serde(rename = "models")]
    pub(crate) classes: Vec<ClassModel>,

    // Sum of the per-class vocabulary sizes, not the size of their union.
    // Classification outcomes depend on this choice.
    pub(crate) total_vocabulary_size: u64,

    pub(crate) total_document_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) meta: Option<ModelMeta>,
}

impl Model {
    /// Returns the per-class models in their training order.
    pub fn classes(&self) -> &[ClassModel] {
        &self.classes
    }

    /// Returns the smoothing denominator term `|V|`: the sum over all
    /// classes of the number of distinct retained words.
    pub fn total_vocabulary_size(&self) -> u64 {
        self.total_vocabulary_size
    }

    /// Returns the total number of training documents.
    pub fn total_document_count(&self) -> u64 {
        self.total_document_count
    }

    /// Returns the artifact metadata, if present.
    pub fn meta(&self) -> Option<&ModelMeta> {
        self.meta.as_ref()
    }

    /// Sets the model name in the artifact metadata.
    pub fn set_name<S>(&mut self, name: S)
    where
        S: Into<String>,
    {
        self.meta.get_or_insert_with(ModelMeta::default).name = Some(name.into());
    }

    /// Exports the model data as a JSON document.
    ///
    /// # Arguments
    ///
    /// * `wtr` - Byte-oriented sink object.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        serde_json::to_writer(wtr, self)?;
        Ok(())
    }

    /// Creates a model from a reader holding a JSON document.
    ///
    /// This performs no invariant checking; use [`Model::validate`] or hand
    /// the result to [`Classifier::new`](crate::Classifier::new), which
    /// validates before deriving any probability.
    ///
    /// # Arguments
    ///
    /// * `rdr` - A data source.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        Ok(serde_json::from_reader(rdr)?)
    }

    /// Reads and validates a model from a file path.
    ///
    /// # Errors
    ///
    /// [`PostinoError::ModelNotFound`] will be returned if no file exists at
    /// `path`; [`PostinoError::InvalidModel`] if the artifact violates a
    /// model invariant.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                PostinoError::model_not_found(path.to_path_buf())
            } else {
                PostinoError::IOError(e)
            }
        })?;
        let model = Self::read(&mut BufReader::new(file))?;
        model.validate()?;
        Ok(model)
    }

    /// Checks every model invariant.
    ///
    /// A violation means the artifact would produce a non-finite log value
    /// or a silently wrong score, so loading code rejects it up front rather
    /// than failing mid-scoring.
    ///
    /// # Errors
    ///
    /// [`PostinoError::InvalidModel`] describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(PostinoError::invalid_model("model contains no classes"));
        }
        let mut seen = HashSet::new();
        let mut document_count_sum = 0;
        let mut vocabulary_size_sum = 0;
        for class in &self.classes {
            if !seen.insert(class.class_name.as_str()) {
                return Err(PostinoError::invalid_model(format!(
                    "duplicate class name: {}",
                    class.class_name
                )));
            }
            if class.document_count == 0 {
                return Err(PostinoError::invalid_model(format!(
                    "class {} has a document count of zero",
                    class.class_name
                )));
            }
            let word_count_sum: u64 = class.word_counts.values().sum();
            if word_count_sum != class.total_word_count {
                return Err(PostinoError::invalid_model(format!(
                    "class {} has a total word count of {} but its word counts sum to {}",
                    class.class_name, class.total_word_count, word_count_sum
                )));
            }
            document_count_sum += class.document_count;
            vocabulary_size_sum += class.vocabulary_size();
        }
        if document_count_sum != self.total_document_count {
            return Err(PostinoError::invalid_model(format!(
                "total document count is {} but class document counts sum to {}",
                self.total_document_count, document_count_sum
            )));
        }
        if vocabulary_size_sum != self.total_vocabulary_size {
            return Err(PostinoError::invalid_model(format!(
                "total vocabulary size is {} but class vocabularies sum to {}",
                self.total_vocabulary_size, vocabulary_size_sum
            )));
        }
        if self.total_vocabulary_size == 0 {
            return Err(PostinoError::invalid_model("model has an empty vocabulary"));
        }
        Ok(())
    }

    /// Caps every class vocabulary at `limit` words, keeping the highest
    /// counts, and recomputes all derived totals. Ties among equal counts
    /// keep the lexicographically smaller word.
    ///
    /// The cap is recorded in the artifact metadata.
    pub fn truncate_vocabulary(&mut self, limit: NonZeroU64) {
        for class in &mut self.classes {
            class.truncate(limit);
        }
        self.total_vocabulary_size = self.classes.iter().map(|c| c.vocabulary_size()).sum();
        self.meta.get_or_insert_with(ModelMeta::default).vocabulary_limit = Some(limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> Model {
        Model {
            classes: vec![
                ClassModel {
                    class_name: "spam".to_string(),
                    document_count: 1,
                    total_word_count: 3,
                    word_counts: [("buy".to_string(), 2), ("now".to_string(), 1)].into(),
                },
                ClassModel {
                    class_name: "ham".to_string(),
                    document_count: 1,
                    total_word_count: 2,
                    word_counts: [("hello".to_string(), 1), ("friend".to_string(), 1)].into(),
                },
            ],
            total_vocabulary_size: 4,
            total_document_count: 2,
            meta: None,
        }
    }

    #[test]
    fn test_write_read_round_trip() {
        let model = sample_model();
        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let restored = Model::read(&mut buf.as_slice()).unwrap();

        restored.validate().unwrap();
        assert_eq!(2, restored.classes().len());
        assert_eq!("spam", restored.classes()[0].class_name());
        assert_eq!(2, restored.classes()[0].word_counts()["buy"]);
        assert_eq!(4, restored.total_vocabulary_size());
        assert_eq!(2, restored.total_document_count());
        assert!(restored.meta().is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let model = sample_model();
        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(2, value["models"].as_array().unwrap().len());
        assert_eq!("spam", value["models"][0]["class_name"]);
        assert_eq!(1, value["models"][0]["class_document_count"]);
        assert_eq!(3, value["models"][0]["total_word_count"]);
        assert_eq!(2, value["models"][0]["word_counts"]["buy"]);
        assert_eq!(4, value["total_vocabulary_size"]);
        assert_eq!(2, value["total_document_count"]);
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn test_read_external_artifact() {
        // An artifact written by another producer: meta absent, fields in a
        // different order.
        let json = r#"{
            "total_document_count": 2,
            "total_vocabulary_size": 2,
            "models": [
                {"class_name": "a", "class_document_count": 1, "total_word_count": 1,
                 "word_counts": {"x": 1}},
                {"class_name": "b", "class_document_count": 1, "total_word_count": 2,
                 "word_counts": {"y": 2}}
            ]
        }"#;
        let model = Model::read(&mut json.as_bytes()).unwrap();
        model.validate().unwrap();
        assert_eq!("a", model.classes()[0].class_name());
        assert_eq!(2, model.classes()[1].total_word_count());
    }

    #[test]
    fn test_validate_no_classes() {
        let model = Model {
            classes: vec![],
            total_vocabulary_size: 0,
            total_document_count: 0,
            meta: None,
        };
        assert_eq!(
            "InvalidModelError: model contains no classes",
            &model.validate().err().unwrap().to_string()
        );
    }

    #[test]
    fn test_validate_duplicate_class_name() {
        let mut model = sample_model();
        model.classes[1].class_name = "spam".to_string();
        assert_eq!(
            "InvalidModelError: duplicate class name: spam",
            &model.validate().err().unwrap().to_string()
        );
    }

    #[test]
    fn test_validate_zero_document_count() {
        let mut model = sample_model();
        model.classes[0].document_count = 0;
        assert_eq!(
            "InvalidModelError: class spam has a document count of zero",
            &model.validate().err().unwrap().to_string()
        );
    }

    #[test]
    fn test_validate_word_count_mismatch() {
        let mut model = sample_model();
        model.classes[0].total_word_count = 9;
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_total_mismatches() {
        let mut model = sample_model();
        model.total_document_count = 5;
        assert!(model.validate().is_err());

        let mut model = sample_model();
        model.total_vocabulary_size = 7;
        assert!(model.validate().is_err());
    }

    #[test]
    fn test_validate_empty_vocabulary() {
        let model = Model {
            classes: vec![ClassModel {
                class_name: "spam".to_string(),
                document_count: 1,
                total_word_count: 0,
                word_counts: BTreeMap::new(),
            }],
            total_vocabulary_size: 0,
            total_document_count: 1,
            meta: None,
        };
        assert_eq!(
            "InvalidModelError: model has an empty vocabulary",
            &model.validate().err().unwrap().to_string()
        );
    }

    #[test]
    fn test_truncate_vocabulary() {
        let mut model = Model {
            classes: vec![ClassModel {
                class_name: "spam".to_string(),
                document_count: 1,
                total_word_count: 9,
                word_counts: [
                    ("a".to_string(), 5),
                    ("b".to_string(), 3),
                    ("c".to_string(), 1),
                ]
                .into(),
            }],
            total_vocabulary_size: 3,
            total_document_count: 1,
            meta: None,
        };
        model.truncate_vocabulary(NonZeroU64::new(1).unwrap());

        let class = &model.classes()[0];
        assert_eq!(1, class.vocabulary_size());
        assert_eq!(5, class.word_counts()["a"]);
        assert_eq!(5, class.total_word_count());
        assert_eq!(1, model.total_vocabulary_size());
        assert_eq!(
            NonZeroU64::new(1),
            model.meta().unwrap().vocabulary_limit
        );
        model.validate().unwrap();
    }

    #[test]
    fn test_truncate_vocabulary_tie_break() {
        let mut model = Model {
            classes: vec![ClassModel {
                class_name: "spam".to_string(),
                document_count: 1,
                total_word_count: 4,
                word_counts: [("b".to_string(), 2), ("a".to_string(), 2)].into(),
            }],
            total_vocabulary_size: 2,
            total_document_count: 1,
            meta: None,
        };
        model.truncate_vocabulary(NonZeroU64::new(1).unwrap());

        // Equal counts: the lexicographically smaller word survives.
        let class = &model.classes()[0];
        assert!(class.word_counts().contains_key("a"));
        assert!(!class.word_counts().contains_key("b"));
    }

    #[test]
    fn test_truncate_vocabulary_no_op_below_limit() {
        let mut model = sample_model();
        model.truncate_vocabulary(NonZeroU64::new(100).unwrap());
        assert_eq!(4, model.total_vocabulary_size());
        assert_eq!(3, model.classes()[0].total_word_count());
    }

    #[test]
    fn test_from_path_missing() {
        let e = Model::from_path("no-such-directory/model.json");
        assert_eq!(
            "ModelNotFoundError: no model found at: no-such-directory/model.json",
            &e.err().unwrap().to_string()
        );
    }
}

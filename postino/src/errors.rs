//! Definition of errors.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

pub type Result<T, E = PostinoError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum PostinoError {
    InvalidCorpus(CorpusError),
    InvalidModel(InvalidModelError),
    InvalidArgument(InvalidArgumentError),
    ModelNotFound(ModelNotFoundError),
    SerdeError(serde_json::Error),
    IOError(std::io::Error),
}

impl PostinoError {
    pub(crate) fn invalid_corpus<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidCorpus(CorpusError { msg: msg.into() })
    }

    pub(crate) fn invalid_model<S>(msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidModel(InvalidModelError { msg: msg.into() })
    }

    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn model_not_found(path: PathBuf) -> Self {
        Self::ModelNotFound(ModelNotFoundError { path })
    }
}

impl fmt::Display for PostinoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidCorpus(e) => e.fmt(f),
            Self::InvalidModel(e) => e.fmt(f),
            Self::InvalidArgument(e) => e.fmt(f),
            Self::ModelNotFound(e) => e.fmt(f),
            Self::SerdeError(e) => e.fmt(f),
            Self::IOError(e) => e.fmt(f),
        }
    }
}

impl Error for PostinoError {}

/// Error used when the corpus cannot produce a model.
#[derive(Debug)]
pub struct CorpusError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "CorpusError: {}", self.msg)
    }
}

impl Error for CorpusError {}

/// Error used when the model is invalid.
#[derive(Debug)]
pub struct InvalidModelError {
    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidModelError: {}", self.msg)
    }
}

impl Error for InvalidModelError {}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when no model artifact exists at the expected location.
#[derive(Debug)]
pub struct ModelNotFoundError {
    /// Expected location of the artifact.
    pub(crate) path: PathBuf,
}

impl fmt::Display for ModelNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ModelNotFoundError: no model found at: {}", self.path.display())
    }
}

impl Error for ModelNotFoundError {}

impl From<serde_json::Error> for PostinoError {
    fn from(error: serde_json::Error) -> Self {
        Self::SerdeError(error)
    }
}

impl From<std::io::Error> for PostinoError {
    fn from(error: std::io::Error) -> Self {
        Self::IOError(error)
    }
}

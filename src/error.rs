use thiserror::Error;

/// Classifies taxonomy provider errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyErrorKind {
    /// Required path or URL not configured
    NotConfigured,
    /// File open/read failure
    FileError,
    /// Malformed JSON or a node violating the taxonomy invariants
    InvalidData,
    /// Download or verification failure
    DownloadFailed,
}

/// Classifier error types
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("Phone number not recognized by numbering plan: {0}")]
    UnrecognizedNumber(String),

    #[error("Taxonomy error: {message}")]
    Taxonomy {
        kind: TaxonomyErrorKind,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClassifierError {
    pub(crate) fn taxonomy(kind: TaxonomyErrorKind, message: impl Into<String>) -> Self {
        ClassifierError::Taxonomy {
            kind,
            message: message.into(),
        }
    }

    /// Taxonomy error kind, if this is a taxonomy error
    pub fn taxonomy_kind(&self) -> Option<TaxonomyErrorKind> {
        match self {
            ClassifierError::Taxonomy { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClassifierError>;

pub mod vocabulary;
pub mod word_bank;

pub use vocabulary::{RawVocabulary, RawWord};
pub use word_bank::{WordBank, WordEntry};

/// Raised while loading or indexing vocabulary. A bank is never left
/// half-built when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum DataValidationError {
    #[error("{level}.{category}[{index}] is missing required field `{field}`")]
    MissingField {
        level: String,
        category: String,
        index: usize,
        field: &'static str,
    },
    #[error("duplicate word id `{0}`")]
    DuplicateId(String),
    #[error("malformed vocabulary at {path}: expected {expected}")]
    Malformed {
        path: String,
        expected: &'static str,
    },
    #[error("invalid vocabulary JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

use thiserror::Error;

/// Errors surfaced to callers of the index and its specializations.
///
/// All of them are recoverable: the caller can fix its input (or normalize the
/// index) and try again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("index is not normalized")]
    NotNormalized,
    #[error("'{0}' is not in the index")]
    ItemNotFound(String),
    #[error("'{0}' has no indexable content")]
    NoContent(String),
    #[error("item {index} is out of range for an index of {len} items")]
    OutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;

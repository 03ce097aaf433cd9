use pim_core::BackendType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// Two fragments wrote data at the same document path.
    #[error("index document path \"{path}\" is already set")]
    PathConflict { path: String },

    #[error("value of attribute \"{attribute}\" does not hold {backend_type} data")]
    UnsupportedValue {
        attribute: String,
        backend_type: BackendType,
    },

    #[error("no indexing normalizer supports attribute \"{attribute}\" ({backend_type})")]
    NoNormalizer {
        attribute: String,
        backend_type: BackendType,
    },

    #[error("normalization format \"{0}\" is not supported")]
    UnsupportedFormat(String),
}

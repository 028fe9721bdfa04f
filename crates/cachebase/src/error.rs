//! Error types for store operations.

use cachebase_merge::MergeError;
use cachebase_path::PathError;
use thiserror::Error;

/// Errors surfaced by [`Cache`](crate::Cache) operations.
///
/// Reading a missing key is not an error; it yields `Ok(None)`.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The key did not parse, or addressed the root where a key is needed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A merge or union could not be applied to the existing value.
    #[error(transparent)]
    Merge(#[from] MergeError),

    /// The input had the wrong shape for the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A listener rejected the event. Raised by listeners themselves.
    #[error("listener failed: {0}")]
    Listener(String),

    /// The store configuration is unusable.
    #[error("invalid config: {0}")]
    Config(String),
}

/// Result alias for store operations.
pub type CacheResult<T> = Result<T, CacheError>;

impl From<toml::de::Error> for CacheError {
    fn from(err: toml::de::Error) -> Self {
        CacheError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_errors_display_transparently() {
        let err: CacheError = PathError::RootAssignment.into();
        assert_eq!(err.to_string(), "cannot assign to the root path");
    }

    #[test]
    fn merge_errors_convert() {
        let err: CacheError = MergeError::TypeConflict {
            expected: "array",
            found: "string",
        }
        .into();
        assert!(matches!(err, CacheError::Merge(MergeError::TypeConflict { .. })));
        assert!(err.to_string().contains("expected array"));
    }

    #[test]
    fn toml_errors_become_config_errors() {
        let err: CacheError = toml::from_str::<toml::Table>("= nope").unwrap_err().into();
        assert!(matches!(err, CacheError::Config(_)));
    }
}

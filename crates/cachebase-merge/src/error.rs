//! Error types for merge and union operations.

use thiserror::Error;

/// Errors from the merge engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A union target already holds something other than an array.
    #[error("type conflict: expected {expected}, found {found}")]
    TypeConflict {
        expected: &'static str,
        found: &'static str,
    },

    /// A merge or extend source was not an object.
    #[error("merge source must be an object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Result alias for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

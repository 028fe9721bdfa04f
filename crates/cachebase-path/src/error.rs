//! Error types for path parsing and path-addressed writes.

use thiserror::Error;

/// Errors produced while parsing or applying a [`Path`](crate::Path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A non-empty path contained an empty segment (`"a..b"`, `".a"`, `"a."`).
    #[error("invalid path {path:?}: empty segment at position {position}")]
    EmptySegment { path: String, position: usize },

    /// A write tried to address an array element with a segment that is not
    /// a canonical index.
    #[error("invalid path {path:?}: {segment:?} is not an array index")]
    NotAnIndex { path: String, segment: String },

    /// A write addressed the root itself rather than a key below it.
    #[error("cannot assign to the root path")]
    RootAssignment,
}

/// Result alias for path operations.
pub type PathResult<T> = Result<T, PathError>;

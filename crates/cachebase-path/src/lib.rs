//! Dot-notation path addressing for nested values.
//!
//! A [`Path`] names a location inside a tree of `serde_json::Value`s using a
//! flat string key such as `"a.b.c"`. A backslash before a dot (`"a\\.b"`)
//! makes the dot part of the segment instead of a separator, so keys that
//! contain dots stay addressable.
//!
//! # Modules
//!
//! - [`error`]: [`PathError`] and the [`PathResult`] alias
//! - [`path`]: the [`Path`] type, its parser, and the [`IntoPath`] input trait
//! - [`access`]: `get`/`set`/`has`/`remove` against a root value
//!
//! # Rules
//!
//! 1. Reads never mutate and never fail: a missing segment yields `None`.
//! 2. Writes create intermediate objects and replace scalars that sit where
//!    a container is needed.
//! 3. Numeric segments index into arrays. On write, an index at or past the
//!    end extends the array, padding with `null`; any other segment into an
//!    array is an error and leaves the array intact.

pub mod access;
pub mod error;
pub mod path;

pub use access::{delete, get, get_mut, has, has_own, remove, set};
pub use error::{PathError, PathResult};
pub use path::{IntoPath, Path};

//! Structural merge operations for nested values.
//!
//! - [`deep_merge`] / [`merge_all`]: recursive object merge, last write wins
//!   on anything that is not an object on both sides
//! - [`extend`]: shallow, `Object.assign`-style copy of top-level keys
//! - [`union`]: append-if-absent into an array, order preserving
//!
//! Nothing in this crate knows about paths; callers resolve the target value
//! first and hand it in.

pub mod error;
pub mod merge;
pub mod union;

use serde_json::Value;

pub use error::{MergeError, MergeResult};
pub use merge::{deep_merge, extend, merge_all};
pub use union::{flatten_values, union};

/// Short name of a value's JSON type, for error messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Order-preserving set union into arrays.

use serde_json::Value;

use crate::error::{MergeError, MergeResult};
use crate::value_kind;

/// Flatten one level: an array contributes its elements, anything else
/// contributes itself.
pub fn flatten_values(values: Value) -> Vec<Value> {
    match values {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Append each of `values` to the `target` array unless an equal value is
/// already there. Returns how many values were appended.
///
/// `values` is flattened one level first, so a scalar and a one-element
/// array behave the same. Existing order is kept and new values are
/// appended in input order; duplicates within the input collapse too.
///
/// # Examples
///
/// ```
/// use cachebase_merge::union;
/// use serde_json::json;
///
/// let mut target = json!(["a"]);
/// union(&mut target, json!(["b"])).unwrap();
/// union(&mut target, json!(["a", "c"])).unwrap();
/// assert_eq!(target, json!(["a", "b", "c"]));
/// ```
pub fn union(target: &mut Value, values: Value) -> MergeResult<usize> {
    let items = match target {
        Value::Array(items) => items,
        other => {
            return Err(MergeError::TypeConflict {
                expected: "array",
                found: value_kind(other),
            })
        }
    };

    let mut appended = 0;
    for value in flatten_values(values) {
        if !items.contains(&value) {
            items.push(value);
            appended += 1;
        }
    }
    Ok(appended)
}

//! Deep merge and shallow extend.

use serde_json::{Map, Value};

use crate::error::{MergeError, MergeResult};
use crate::value_kind;

/// Merge `source` into `dest`.
///
/// When both sides hold an object at the same key the merge recurses;
/// otherwise the source value replaces the destination value. Arrays are
/// replaced, not concatenated.
pub fn deep_merge(dest: &mut Value, source: Value) {
    match (dest, source) {
        (Value::Object(dest), Value::Object(source)) => {
            for (key, value) in source {
                match dest.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        dest.insert(key, value);
                    }
                }
            }
        }
        (dest, source) => *dest = source,
    }
}

/// Fold every source into `dest` in order, so later sources win.
pub fn merge_all<I>(dest: &mut Value, sources: I)
where
    I: IntoIterator<Item = Value>,
{
    for source in sources {
        deep_merge(dest, source);
    }
}

/// Copy the top-level keys of each source onto `dest`, later sources
/// winning. Nested objects are replaced wholesale.
///
/// A `dest` that is not an object becomes an empty object first. Every
/// source must be an object.
pub fn extend<I>(dest: &mut Value, sources: I) -> MergeResult<()>
where
    I: IntoIterator<Item = Value>,
{
    if !dest.is_object() {
        *dest = Value::Object(Map::new());
    }
    let Value::Object(target) = dest else {
        return Ok(());
    };

    for source in sources {
        match source {
            Value::Object(entries) => target.extend(entries),
            other => {
                return Err(MergeError::NotAnObject {
                    found: value_kind(&other),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merges_disjoint_keys() {
        let mut dest = json!({"x": "x"});
        deep_merge(&mut dest, json!({"a": "a"}));
        assert_eq!(dest, json!({"x": "x", "a": "a"}));
    }

    #[test]
    fn recurses_into_objects() {
        let mut dest = json!({"a": {"b": "b"}});
        deep_merge(&mut dest, json!({"a": {"c": "c"}}));
        assert_eq!(dest, json!({"a": {"b": "b", "c": "c"}}));
    }

    #[test]
    fn scalar_conflicts_take_source() {
        let mut dest = json!({"a": {"b": 1}, "c": [1, 2]});
        deep_merge(&mut dest, json!({"a": "flat", "c": [3]}));
        assert_eq!(dest, json!({"a": "flat", "c": [3]}));
    }

    #[test]
    fn later_sources_win() {
        let mut dest = json!({});
        merge_all(&mut dest, vec![json!({"a": "B"}), json!({"a": "C"})]);
        assert_eq!(dest, json!({"a": "C"}));
    }

    #[test]
    fn non_object_dest_is_replaced() {
        let mut dest = json!(5);
        deep_merge(&mut dest, json!({"a": 1}));
        assert_eq!(dest, json!({"a": 1}));
    }

    #[test]
    fn extend_is_shallow() {
        let mut dest = json!({"a": {"b": "b"}, "keep": true});
        extend(&mut dest, vec![json!({"a": {"c": "c"}})]).unwrap();
        assert_eq!(dest, json!({"a": {"c": "c"}, "keep": true}));
    }

    #[test]
    fn extend_last_wins_and_coerces_dest() {
        let mut dest = json!("scalar");
        extend(&mut dest, vec![json!({"a": "B"}), json!({"a": "C"})]).unwrap();
        assert_eq!(dest, json!({"a": "C"}));
    }

    #[test]
    fn extend_rejects_non_objects() {
        let mut dest = json!({});
        let err = extend(&mut dest, vec![json!([1])]).unwrap_err();
        assert_eq!(err, MergeError::NotAnObject { found: "array" });
    }
}

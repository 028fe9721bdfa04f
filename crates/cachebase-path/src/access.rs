//! Path-addressed reads and writes against a root [`Value`].
//!
//! Objects are descended by key and arrays by numeric index. Reads are pure;
//! [`set`] creates whatever intermediate objects it needs.

use serde_json::{Map, Value};

use crate::error::{PathError, PathResult};
use crate::path::Path;

/// Resolve `path` against `root`.
///
/// The root path yields `root` itself. Any missing segment yields `None`.
pub fn get<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    walk(root, path.segments())
}

/// Mutable variant of [`get`]. Never creates anything.
pub fn get_mut<'a>(root: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    walk_mut(root, path.segments())
}

/// `true` if a value (including `null`) is reachable at `path`.
pub fn has(root: &Value, path: &Path) -> bool {
    get(root, path).is_some()
}

/// `true` if the terminal segment is an own entry of its parent container:
/// a key of an object or an in-bounds index of an array.
///
/// The root path has no parent and is never an own entry.
pub fn has_own(root: &Value, path: &Path) -> bool {
    let Some((last, parents)) = path.split_last() else {
        return false;
    };
    match walk(root, parents) {
        Some(Value::Object(map)) => map.contains_key(last),
        Some(Value::Array(items)) => array_index(last).is_some_and(|i| i < items.len()),
        _ => false,
    }
}

/// Assign `value` at `path`, returning whatever it replaced.
///
/// Missing intermediates, and scalars sitting where a container is needed,
/// become empty objects. Arrays are only ever indexed: writing past the end
/// pads with `null`, and a non-numeric segment into an array is
/// [`PathError::NotAnIndex`]. Writing to the root path is an error.
pub fn set(root: &mut Value, path: &Path, value: Value) -> PathResult<Option<Value>> {
    let (last, parents) = path.split_last().ok_or(PathError::RootAssignment)?;

    let mut node = root;
    for segment in parents {
        node = descend_or_create(node, path, segment)?;
    }
    assign(node, path, last, value)
}

/// Remove the entry at `path` from its parent, returning it.
///
/// Object keys are removed in place so the remaining keys keep their order;
/// array elements shift down.
pub fn remove(root: &mut Value, path: &Path) -> Option<Value> {
    let (last, parents) = path.split_last()?;
    match walk_mut(root, parents)? {
        Value::Object(map) => map.shift_remove(last),
        Value::Array(items) => {
            let index = array_index(last).filter(|i| *i < items.len())?;
            Some(items.remove(index))
        }
        _ => None,
    }
}

/// `true` if an entry existed at `path` and was removed.
pub fn delete(root: &mut Value, path: &Path) -> bool {
    remove(root, path).is_some()
}

fn walk<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment.as_str()),
        Value::Array(items) => array_index(segment).and_then(|i| items.get(i)),
        _ => None,
    })
}

fn walk_mut<'a>(root: &'a mut Value, segments: &[String]) -> Option<&'a mut Value> {
    segments.iter().try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get_mut(segment.as_str()),
        Value::Array(items) => array_index(segment).and_then(move |i| items.get_mut(i)),
        _ => None,
    })
}

fn descend_or_create<'a>(node: &'a mut Value, path: &Path, segment: &str) -> PathResult<&'a mut Value> {
    match node {
        Value::Object(map) => Ok(map
            .entry(segment)
            .or_insert_with(|| Value::Object(Map::new()))),
        Value::Array(items) => {
            let index = index_into(path, segment)?;
            if index >= items.len() {
                items.resize(index, Value::Null);
                items.push(Value::Object(Map::new()));
            }
            Ok(&mut items[index])
        }
        other => {
            *other = Value::Object(Map::new());
            descend_or_create(other, path, segment)
        }
    }
}

fn assign(parent: &mut Value, path: &Path, segment: &str, value: Value) -> PathResult<Option<Value>> {
    match parent {
        Value::Object(map) => Ok(map.insert(segment.to_owned(), value)),
        Value::Array(items) => {
            let index = index_into(path, segment)?;
            if index < items.len() {
                Ok(Some(std::mem::replace(&mut items[index], value)))
            } else {
                items.resize(index, Value::Null);
                items.push(value);
                Ok(None)
            }
        }
        other => {
            let mut map = Map::new();
            map.insert(segment.to_owned(), value);
            *other = Value::Object(map);
            Ok(None)
        }
    }
}

fn index_into(path: &Path, segment: &str) -> PathResult<usize> {
    array_index(segment).ok_or_else(|| PathError::NotAnIndex {
        path: path.to_string(),
        segment: segment.to_owned(),
    })
}

/// Canonical non-negative integers only: `"0"`, `"7"`, `"12"`; not `"+1"` or `"01"`.
fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn p(s: &str) -> Path {
        Path::parse(s).unwrap()
    }

    // -----------------------------------------------------------------------
    // get / has
    // -----------------------------------------------------------------------

    #[test]
    fn get_nested_value() {
        let root = json!({"a": {"b": {"c": "d"}}});
        assert_eq!(get(&root, &p("a.b.c")), Some(&json!("d")));
        assert_eq!(get(&root, &p("a.b")), Some(&json!({"c": "d"})));
    }

    #[test]
    fn get_root_returns_everything() {
        let root = json!({"a": 1});
        assert_eq!(get(&root, &Path::root()), Some(&root));
    }

    #[test]
    fn get_missing_is_none() {
        let root = json!({"a": {"b": 1}});
        assert_eq!(get(&root, &p("x")), None);
        assert_eq!(get(&root, &p("a.x.y")), None);
        // Descending through a scalar is a miss, not an error.
        assert_eq!(get(&root, &p("a.b.c")), None);
    }

    #[test]
    fn get_indexes_arrays() {
        let root = json!({"list": ["x", {"y": "z"}]});
        assert_eq!(get(&root, &p("list.0")), Some(&json!("x")));
        assert_eq!(get(&root, &p("list.1.y")), Some(&json!("z")));
        assert_eq!(get(&root, &p("list.2")), None);
        assert_eq!(get(&root, &p("list.01")), None);
    }

    #[test]
    fn null_counts_as_present() {
        let root = json!({"a": null});
        assert!(has(&root, &p("a")));
        assert!(has_own(&root, &p("a")));
        assert!(!has(&root, &p("b")));
    }

    #[test]
    fn has_own_checks_parent_entries() {
        let root = json!({"a": {"b": {"c": "d"}}, "x": false, "list": [1]});
        assert!(has_own(&root, &p("a")));
        assert!(has_own(&root, &p("a.b")));
        assert!(has_own(&root, &p("a.b.c")));
        assert!(has_own(&root, &p("x")));
        assert!(has_own(&root, &p("list.0")));
        assert!(!has_own(&root, &p("list.1")));
        assert!(!has_own(&root, &p("lslsls")));
        assert!(!has_own(&root, &Path::root()));
    }

    // -----------------------------------------------------------------------
    // set
    // -----------------------------------------------------------------------

    #[test]
    fn set_creates_intermediates() {
        let mut root = json!({});
        set(&mut root, &p("a.b.c"), json!("d")).unwrap();
        assert_eq!(root, json!({"a": {"b": {"c": "d"}}}));
    }

    #[test]
    fn set_returns_previous_value() {
        let mut root = json!({"a": 1});
        assert_eq!(set(&mut root, &p("a"), json!(2)).unwrap(), Some(json!(1)));
        assert_eq!(set(&mut root, &p("b"), json!(3)).unwrap(), None);
    }

    #[test]
    fn set_overwrites_scalar_intermediates() {
        let mut root = json!({"a": "scalar"});
        set(&mut root, &p("a.b"), json!(true)).unwrap();
        assert_eq!(root, json!({"a": {"b": true}}));
    }

    #[test]
    fn set_escaped_key_is_flat() {
        let mut root = json!({});
        set(&mut root, &p("a\\.b"), json!("v")).unwrap();
        assert_eq!(root, json!({"a.b": "v"}));
        assert_eq!(get(&root, &p("a\\.b")), Some(&json!("v")));
        assert!(!has(&root, &p("a")));
    }

    #[test]
    fn set_into_arrays() {
        let mut root = json!({"list": ["a", {"k": 1}]});
        set(&mut root, &p("list.0"), json!("b")).unwrap();
        set(&mut root, &p("list.1.k"), json!(2)).unwrap();
        set(&mut root, &p("list.2"), json!("appended")).unwrap();
        assert_eq!(root, json!({"list": ["b", {"k": 2}, "appended"]}));

        set(&mut root, &p("list.3.k"), json!(3)).unwrap();
        assert_eq!(root["list"][3], json!({"k": 3}));
    }

    #[test]
    fn set_past_the_end_pads_with_null() {
        let mut root = json!({"list": [1, 2, 3]});
        assert_eq!(set(&mut root, &p("list.5"), json!("x")).unwrap(), None);
        assert_eq!(root, json!({"list": [1, 2, 3, null, null, "x"]}));

        set(&mut root, &p("list.7.k"), json!(true)).unwrap();
        assert_eq!(root["list"][6], Value::Null);
        assert_eq!(root["list"][7], json!({"k": true}));
    }

    #[test]
    fn named_segment_into_array_is_rejected() {
        let mut root = json!({"list": [1, 2, 3]});
        let err = set(&mut root, &p("list.name"), json!("x")).unwrap_err();
        assert_eq!(
            err,
            PathError::NotAnIndex {
                path: "list.name".into(),
                segment: "name".into(),
            }
        );
        assert!(set(&mut root, &p("list.name.deep"), json!("x")).is_err());
        assert_eq!(root, json!({"list": [1, 2, 3]}));
    }

    #[test]
    fn set_root_is_rejected() {
        let mut root = json!({});
        assert_eq!(
            set(&mut root, &Path::root(), json!(1)).unwrap_err(),
            PathError::RootAssignment
        );
    }

    // -----------------------------------------------------------------------
    // remove / delete
    // -----------------------------------------------------------------------

    #[test]
    fn remove_returns_value_and_keeps_order() {
        let mut root = json!({"a": 1, "b": 2, "c": 3});
        assert_eq!(remove(&mut root, &p("a")), Some(json!(1)));
        let keys: Vec<_> = root.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["b", "c"]);
    }

    #[test]
    fn delete_nested_and_missing() {
        let mut root = json!({"a": {"b": "c", "d": "e"}});
        assert!(delete(&mut root, &p("a.b")));
        assert_eq!(root, json!({"a": {"d": "e"}}));
        assert!(!delete(&mut root, &p("a.b")));
        assert!(!delete(&mut root, &p("x.y")));
        assert!(!delete(&mut root, &Path::root()));
    }

    #[test]
    fn delete_array_element_shifts() {
        let mut root = json!({"list": [1, 2, 3]});
        assert!(delete(&mut root, &p("list.0")));
        assert_eq!(root, json!({"list": [2, 3]}));
        assert!(!delete(&mut root, &p("list.5")));
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut root = json!({"a": {"b": []}});
        if let Some(Value::Array(items)) = get_mut(&mut root, &p("a.b")) {
            items.push(json!("x"));
        }
        assert_eq!(root, json!({"a": {"b": ["x"]}}));
        assert!(get_mut(&mut root, &p("a.z")).is_none());
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn set_then_get_round_trips(
            segments in prop::collection::vec("[a-z][a-z0-9_]{0,6}", 1..5),
            value in any::<i64>(),
        ) {
            let path = Path::parse(&segments.join(".")).unwrap();
            let mut root = json!({});
            set(&mut root, &path, json!(value)).unwrap();
            prop_assert_eq!(get(&root, &path), Some(&json!(value)));
            prop_assert!(has(&root, &path));
        }
    }
}

//! Classification of write inputs.
//!
//! Bulk writes accept an object (one write per entry) or an array of
//! objects/arrays (recursively). The shape is decided once, here, and the
//! store dispatches on the resulting [`Input`].

use cachebase_merge::value_kind;
use cachebase_path::{IntoPath, Path};
use serde_json::{Map, Value};

use crate::error::{CacheError, CacheResult};

/// A write request after shape classification.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// One value at one path.
    Entry { path: Path, value: Value },
    /// Every entry of an object; keys are dot-notation paths.
    Bulk(Map<String, Value>),
    /// A sequence of bulk inputs, applied in order.
    List(Vec<Value>),
}

impl Input {
    pub fn entry(key: impl IntoPath, value: impl Into<Value>) -> CacheResult<Self> {
        Ok(Input::Entry {
            path: key.into_path()?,
            value: value.into(),
        })
    }

    /// Decide how a compound value is applied. Scalars are rejected: a bulk
    /// write has no key to put them under.
    pub fn classify(value: Value) -> CacheResult<Self> {
        match value {
            Value::Object(map) => Ok(Input::Bulk(map)),
            Value::Array(items) => Ok(Input::List(items)),
            other => Err(CacheError::InvalidArgument(format!(
                "expected an object or array, found {}",
                value_kind(&other)
            ))),
        }
    }
}

/// Which layer a bulk input is written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitOp {
    /// The primary store.
    Set,
    /// The defaults layer.
    Default,
    /// The options layer.
    Option,
}

/// What a delete addresses.
///
/// Strings name one key. Arrays and vectors of strings are lists of keys,
/// each removed in turn; pass a [`Path`] to delete by segments instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelInput {
    Key(String),
    Path(Path),
    Keys(Vec<String>),
}

impl From<&str> for DelInput {
    fn from(key: &str) -> Self {
        DelInput::Key(key.to_owned())
    }
}

impl From<String> for DelInput {
    fn from(key: String) -> Self {
        DelInput::Key(key)
    }
}

impl From<&String> for DelInput {
    fn from(key: &String) -> Self {
        DelInput::Key(key.clone())
    }
}

impl From<Path> for DelInput {
    fn from(path: Path) -> Self {
        DelInput::Path(path)
    }
}

impl From<&Path> for DelInput {
    fn from(path: &Path) -> Self {
        DelInput::Path(path.clone())
    }
}

impl<const N: usize> From<[&str; N]> for DelInput {
    fn from(keys: [&str; N]) -> Self {
        DelInput::Keys(keys.iter().map(|k| (*k).to_owned()).collect())
    }
}

impl From<&[&str]> for DelInput {
    fn from(keys: &[&str]) -> Self {
        DelInput::Keys(keys.iter().map(|k| (*k).to_owned()).collect())
    }
}

impl From<Vec<&str>> for DelInput {
    fn from(keys: Vec<&str>) -> Self {
        DelInput::Keys(keys.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<String>> for DelInput {
    fn from(keys: Vec<String>) -> Self {
        DelInput::Keys(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_objects_and_arrays() {
        assert!(matches!(Input::classify(json!({"a": 1})), Ok(Input::Bulk(_))));
        assert!(matches!(Input::classify(json!([{"a": 1}])), Ok(Input::List(_))));
    }

    #[test]
    fn scalars_are_invalid() {
        for value in [json!("a"), json!(1), json!(null), json!(true)] {
            assert!(matches!(
                Input::classify(value),
                Err(CacheError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn entry_parses_key() {
        let input = Input::entry("a.b", "c").unwrap();
        assert_eq!(
            input,
            Input::Entry {
                path: Path::parse("a.b").unwrap(),
                value: json!("c"),
            }
        );
        assert!(matches!(Input::entry("a..b", 1), Err(CacheError::Path(_))));
    }

    #[test]
    fn del_input_sequences_are_key_lists() {
        assert_eq!(DelInput::from("a.b"), DelInput::Key("a.b".into()));
        assert_eq!(
            DelInput::from(["a", "c"]),
            DelInput::Keys(vec!["a".into(), "c".into()])
        );
        assert_eq!(
            DelInput::from(vec!["a".to_string()]),
            DelInput::Keys(vec!["a".into()])
        );
        let path = Path::parse("a.c").unwrap();
        assert_eq!(DelInput::from(&path), DelInput::Path(path));
    }
}

//! Events emitted by the store after each operation.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CacheError;

/// The name an event is subscribed and emitted under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Set,
    Get,
    Has,
    HasOwn,
    Del,
    Union,
    Default,
    Option,
    Clear,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        EventKind::Set,
        EventKind::Get,
        EventKind::Has,
        EventKind::HasOwn,
        EventKind::Del,
        EventKind::Union,
        EventKind::Default,
        EventKind::Option,
        EventKind::Clear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Set => "set",
            EventKind::Get => "get",
            EventKind::Has => "has",
            EventKind::HasOwn => "hasOwn",
            EventKind::Del => "del",
            EventKind::Union => "union",
            EventKind::Default => "default",
            EventKind::Option => "option",
            EventKind::Clear => "clear",
        }
    }

    /// `true` for events raised by queries rather than mutations.
    pub fn is_read(&self) -> bool {
        matches!(self, EventKind::Get | EventKind::Has | EventKind::HasOwn)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CacheError::InvalidArgument(format!("unknown event name: {s:?}")))
    }
}

/// A single emission. Keys are the canonical dot-notation form of the path
/// the operation addressed.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A value was written to the store.
    Set { key: String, value: Value },
    /// A read completed; `value` is `None` on a miss.
    Get { key: String, value: Option<Value> },
    Has { key: String, present: bool },
    HasOwn { key: String, present: bool },
    /// One key was removed. Bulk deletes emit one of these per key.
    Del { key: String },
    /// `value` is what the caller asked to union in, before deduplication.
    Union { key: String, value: Value },
    /// A value was written to the defaults layer.
    Default { key: String, value: Value },
    /// A value was written to the options layer.
    Option { key: String, value: Value },
    /// The whole store was reset.
    Clear,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Set { .. } => EventKind::Set,
            Event::Get { .. } => EventKind::Get,
            Event::Has { .. } => EventKind::Has,
            Event::HasOwn { .. } => EventKind::HasOwn,
            Event::Del { .. } => EventKind::Del,
            Event::Union { .. } => EventKind::Union,
            Event::Default { .. } => EventKind::Default,
            Event::Option { .. } => EventKind::Option,
            Event::Clear => EventKind::Clear,
        }
    }

    /// The key the event is about, if it is about one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Event::Set { key, .. }
            | Event::Get { key, .. }
            | Event::Has { key, .. }
            | Event::HasOwn { key, .. }
            | Event::Del { key }
            | Event::Union { key, .. }
            | Event::Default { key, .. }
            | Event::Option { key, .. } => Some(key.as_str()),
            Event::Clear => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn unknown_name_is_invalid_argument() {
        let err = "explode".parse::<EventKind>().unwrap_err();
        assert!(matches!(err, CacheError::InvalidArgument(_)));
    }

    #[test]
    fn read_kinds() {
        assert!(EventKind::Get.is_read());
        assert!(EventKind::HasOwn.is_read());
        assert!(!EventKind::Set.is_read());
        assert!(!EventKind::Clear.is_read());
    }

    #[test]
    fn event_kind_and_key() {
        let event = Event::Set {
            key: "a.b".into(),
            value: json!(1),
        };
        assert_eq!(event.kind(), EventKind::Set);
        assert_eq!(event.key(), Some("a.b"));

        assert_eq!(Event::Clear.kind(), EventKind::Clear);
        assert_eq!(Event::Clear.key(), None);
    }
}

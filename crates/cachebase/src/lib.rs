//! In-memory property store with dot-notation paths.
//!
//! A [`Cache`] holds a primary store, a defaults layer consulted on read
//! misses, and a separate options bag. Keys address nested values with `.`
//! as the separator and `\.` for a literal dot. Every mutation (and, unless
//! disabled in [`CacheConfig`], every read) emits an [`Event`] to listeners
//! registered with [`Cache::on`].

pub mod cache;
pub mod config;
pub mod emitter;
pub mod error;
pub mod event;
pub mod input;

pub use cache::Cache;
pub use config::CacheConfig;
pub use emitter::{Delivery, Emitter, Listener, ListenerId};
pub use error::{CacheError, CacheResult};
pub use event::{Event, EventKind};
pub use input::{DelInput, Input, VisitOp};

// Re-export the value and path types callers need.
pub use cachebase_path::{IntoPath, Path};
pub use serde_json::Value;

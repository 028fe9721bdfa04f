//! The [`Cache`] store facade.

use std::fmt;

use cachebase_merge as merge;
use cachebase_path::{self as path, IntoPath, Path};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::emitter::{Emitter, ListenerId};
use crate::error::{CacheError, CacheResult};
use crate::event::{Event, EventKind};
use crate::input::{DelInput, Input, VisitOp};

/// In-memory property store with dot-notation keys, a defaults layer
/// consulted on read misses, and synchronous change events.
///
/// Three independent object trees live inside a cache:
///
/// - the **store**, written by [`set`](Self::set) and friends
/// - the **defaults**, written by [`set_default`](Self::set_default) and
///   read by [`get`](Self::get) only when the store has nothing at a path
/// - the **options**, a separate configuration bag that `get` never sees
///
/// Mutators return `&mut Self` so calls chain with `?`:
///
/// ```
/// use cachebase::Cache;
///
/// let mut app = Cache::new();
/// app.set("foo", "xxx")?
///     .set_default("foo", "one")?
///     .set_default("bar", "two")?;
///
/// assert_eq!(app.get("foo")?, Some("xxx".into()));
/// assert_eq!(app.get("bar")?, Some("two".into()));
/// # Ok::<(), cachebase::CacheError>(())
/// ```
pub struct Cache {
    config: CacheConfig,
    store: Value,
    defaults: Value,
    options: Value,
    events: Emitter<Cache>,
}

impl Cache {
    pub fn new() -> Self {
        Self::build(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> CacheResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// A cache whose store is published under `field` instead of `"cache"`.
    pub fn named(field: impl Into<String>) -> CacheResult<Self> {
        Self::with_config(CacheConfig::named(field))
    }

    /// A cache seeded through [`set_all`](Self::set_all).
    pub fn with_data(seed: Value) -> CacheResult<Self> {
        let mut cache = Self::new();
        cache.set_all(seed)?;
        Ok(cache)
    }

    pub fn named_with_data(field: impl Into<String>, seed: Value) -> CacheResult<Self> {
        let mut cache = Self::named(field)?;
        cache.set_all(seed)?;
        Ok(cache)
    }

    fn build(config: CacheConfig) -> Self {
        Self {
            config,
            store: empty_object(),
            defaults: empty_object(),
            options: empty_object(),
            events: Emitter::new(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn storage_field(&self) -> &str {
        &self.config.storage_field
    }

    // ---- Events ----

    /// Subscribe to `kind`. The listener gets the cache itself and may call
    /// back into it.
    pub fn on<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut Cache, &Event) -> CacheResult<()> + 'static,
    {
        self.events.on(kind, listener)
    }

    pub fn once<F>(&mut self, kind: EventKind, listener: F) -> ListenerId
    where
        F: FnMut(&mut Cache, &Event) -> CacheResult<()> + 'static,
    {
        self.events.once(kind, listener)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.events.listener_count(kind)
    }

    /// Deliver `event` to its listeners. A listener error aborts delivery
    /// and is returned.
    pub fn emit(&mut self, event: Event) -> CacheResult<()> {
        let kind = event.kind();
        if kind.is_read() && !self.config.emit_read_events {
            return Ok(());
        }
        let delivery = self.events.prepare(kind);
        if delivery.is_empty() {
            return Ok(());
        }
        trace!(kind = %kind, listeners = delivery.len(), "emit");
        delivery.deliver(self, &event)
    }

    // ---- Writes ----

    /// Assign `value` at `key` and emit `set`.
    pub fn set(&mut self, key: impl IntoPath, value: impl Into<Value>) -> CacheResult<&mut Self> {
        let path = key.into_path()?;
        self.write(path, value.into())
    }

    /// Write every entry of an object, or of each object in an array, with
    /// one `set` per entry.
    pub fn set_all(&mut self, input: Value) -> CacheResult<&mut Self> {
        self.visit(VisitOp::Set, input)
    }

    /// Apply an already classified input to the store.
    pub fn apply(&mut self, input: Input) -> CacheResult<&mut Self> {
        self.apply_to(VisitOp::Set, input)
    }

    /// Classify `value` and write it entry by entry to the layer `op` names.
    pub fn visit(&mut self, op: VisitOp, value: Value) -> CacheResult<&mut Self> {
        let input = Input::classify(value)?;
        self.apply_to(op, input)
    }

    fn apply_to(&mut self, op: VisitOp, input: Input) -> CacheResult<&mut Self> {
        match input {
            Input::Entry { path, value } => match op {
                VisitOp::Set => self.write(path, value),
                VisitOp::Default => self.write_default(path, value),
                VisitOp::Option => self.write_option(path, value),
            },
            Input::Bulk(entries) => {
                for (key, value) in entries {
                    let path = Path::parse(&key)?;
                    self.apply_to(op, Input::Entry { path, value })?;
                }
                Ok(self)
            }
            Input::List(items) => {
                for item in items {
                    self.visit(op, item)?;
                }
                Ok(self)
            }
        }
    }

    fn write(&mut self, path: Path, value: Value) -> CacheResult<&mut Self> {
        path::set(&mut self.store, &path, value.clone())?;
        debug!(key = %path, "set");
        self.emit(Event::Set {
            key: path.to_string(),
            value,
        })?;
        Ok(self)
    }

    /// Write `value` only if nothing is stored at `key` yet.
    pub fn prime(&mut self, key: impl IntoPath, value: impl Into<Value>) -> CacheResult<&mut Self> {
        let path = key.into_path()?;
        if !self.has(&path)? {
            self.write(path, value.into())?;
        }
        Ok(self)
    }

    /// Union `values` into the array at `key`, creating it if absent.
    ///
    /// Fails with a type conflict when `key` holds something other than an
    /// array.
    pub fn union(&mut self, key: impl IntoPath, values: impl Into<Value>) -> CacheResult<&mut Self> {
        let path = key.into_path()?;
        let values = values.into();

        let appended = match path::get_mut(&mut self.store, &path) {
            Some(target) => merge::union(target, values.clone())?,
            None => {
                let mut target = Value::Array(Vec::new());
                let appended = merge::union(&mut target, values.clone())?;
                path::set(&mut self.store, &path, target)?;
                appended
            }
        };

        debug!(key = %path, appended, "union");
        self.emit(Event::Union {
            key: path.to_string(),
            value: values,
        })?;
        Ok(self)
    }

    /// Deep-merge every source object into the store, later sources
    /// winning. Each top-level key touched is written back with `set`.
    pub fn merge<I>(&mut self, sources: I) -> CacheResult<&mut Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut patch = empty_object();
        merge::merge_all(&mut patch, object_sources(sources)?);

        if let Value::Object(entries) = patch {
            debug!(keys = entries.len(), "merge");
            for (key, value) in entries {
                let path = Path::literal(key);
                let mut merged = path::get(&self.store, &path).cloned().unwrap_or(Value::Null);
                merge::deep_merge(&mut merged, value);
                self.write(path, merged)?;
            }
        }
        Ok(self)
    }

    /// Deep-merge the sources into the object at `key` (an empty object if
    /// nothing is there) and write the result back with `set`.
    pub fn merge_at<I>(&mut self, key: impl IntoPath, sources: I) -> CacheResult<&mut Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let path = key.into_path()?;
        let mut target = self.object_at(&path);
        merge::merge_all(&mut target, object_sources(sources)?);
        debug!(key = %path, "merge");
        self.write(path, target)
    }

    /// Shallow variant of [`merge`](Self::merge): top-level keys of each
    /// source overwrite the store's.
    pub fn extend<I>(&mut self, sources: I) -> CacheResult<&mut Self>
    where
        I: IntoIterator<Item = Value>,
    {
        for source in object_sources(sources)? {
            if let Value::Object(entries) = source {
                for (key, value) in entries {
                    self.write(Path::literal(key), value)?;
                }
            }
        }
        Ok(self)
    }

    /// Shallow variant of [`merge_at`](Self::merge_at).
    pub fn extend_at<I>(&mut self, key: impl IntoPath, sources: I) -> CacheResult<&mut Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let path = key.into_path()?;
        let mut target = self.object_at(&path);
        merge::extend(&mut target, sources)?;
        self.write(path, target)
    }

    /// Copy the named keys of `source` into the store. Keys `source` does
    /// not have are skipped.
    pub fn pick<I, K>(&mut self, source: &Value, keys: I) -> CacheResult<&mut Self>
    where
        I: IntoIterator<Item = K>,
        K: IntoPath,
    {
        for key in keys {
            let path = key.into_path()?;
            if let Some(value) = path::get(source, &path) {
                self.write(path, value.clone())?;
            }
        }
        Ok(self)
    }

    pub fn enable(&mut self, key: impl IntoPath) -> CacheResult<&mut Self> {
        self.set(key, true)
    }

    pub fn disable(&mut self, key: impl IntoPath) -> CacheResult<&mut Self> {
        self.set(key, false)
    }

    // ---- Reads ----

    /// Value at `key`, falling back to the defaults layer when the store has
    /// nothing there. Emits `get`, including on a miss.
    ///
    /// The empty key returns a copy of the whole store.
    pub fn get(&mut self, key: impl IntoPath) -> CacheResult<Option<Value>> {
        let path = key.into_path()?;
        let value = self.lookup(&path).cloned();
        trace!(key = %path, hit = value.is_some(), "get");
        self.emit(Event::Get {
            key: path.to_string(),
            value: value.clone(),
        })?;
        Ok(value)
    }

    /// A copy of the whole store.
    pub fn get_all(&mut self) -> CacheResult<Value> {
        Ok(self.get(Path::root())?.unwrap_or_else(empty_object))
    }

    /// Borrowing read with the same fallback as [`get`](Self::get), but
    /// without emitting.
    pub fn peek(&self, key: impl IntoPath) -> CacheResult<Option<&Value>> {
        let path = key.into_path()?;
        Ok(self.lookup(&path))
    }

    fn lookup(&self, path: &Path) -> Option<&Value> {
        path::get(&self.store, path).or_else(|| path::get(&self.defaults, path))
    }

    /// `true` if the store holds a value at `key`. `null` counts; defaults
    /// do not. Emits `has`.
    pub fn has(&mut self, key: impl IntoPath) -> CacheResult<bool> {
        let path = key.into_path()?;
        let present = path::has(&self.store, &path);
        self.emit(Event::Has {
            key: path.to_string(),
            present,
        })?;
        Ok(present)
    }

    /// `true` if the last segment of `key` is an own entry of its parent in
    /// the store. Emits `hasOwn`.
    pub fn has_own(&mut self, key: impl IntoPath) -> CacheResult<bool> {
        let path = key.into_path()?;
        let present = path::has_own(&self.store, &path);
        self.emit(Event::HasOwn {
            key: path.to_string(),
            present,
        })?;
        Ok(present)
    }

    /// Truthiness of [`get`](Self::get): absent, `null`, `false`, `0` and
    /// `""` are disabled.
    pub fn enabled(&mut self, key: impl IntoPath) -> CacheResult<bool> {
        Ok(self.get(key)?.as_ref().is_some_and(is_truthy))
    }

    pub fn disabled(&mut self, key: impl IntoPath) -> CacheResult<bool> {
        Ok(!self.enabled(key)?)
    }

    /// Borrowed view of the store.
    pub fn data(&self) -> &Value {
        &self.store
    }

    /// Top-level keys of the store in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.entries().map(|(key, _)| key.clone()).collect()
    }

    pub fn size(&self) -> usize {
        self.store.as_object().map_or(0, Map::len)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Call `f` with each top-level entry of the store, in order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &Value),
    {
        for (key, value) in self.entries() {
            f(key, value);
        }
    }

    fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.store.as_object().into_iter().flat_map(|map| map.iter())
    }

    /// The defaults layer deep-merged under the store: what a reader sees
    /// across both layers. Neither layer is modified.
    pub fn resolved(&self) -> Value {
        let mut view = self.defaults.clone();
        merge::deep_merge(&mut view, self.store.clone());
        view
    }

    // ---- Deletes ----

    /// Remove a key, or each key of a list in order, emitting one `del` per
    /// key that was there. The empty key removes everything, like
    /// [`del_all`](Self::del_all).
    ///
    /// `del(["a", "c"])` removes `a` and `c`; to remove `a.c` by segments,
    /// pass a [`Path`].
    pub fn del(&mut self, target: impl Into<DelInput>) -> CacheResult<&mut Self> {
        match target.into() {
            DelInput::Key(key) => self.del_path(Path::parse(&key)?),
            DelInput::Path(path) => self.del_path(path),
            DelInput::Keys(keys) => {
                for key in keys {
                    self.del_path(Path::parse(&key)?)?;
                }
                Ok(self)
            }
        }
    }

    fn del_path(&mut self, path: Path) -> CacheResult<&mut Self> {
        if path.is_root() {
            return self.del_all();
        }
        if path::delete(&mut self.store, &path) {
            debug!(key = %path, "del");
            self.emit(Event::Del {
                key: path.to_string(),
            })?;
        }
        Ok(self)
    }

    /// Remove each key in order, one `del` event per key removed.
    pub fn del_many<I, K>(&mut self, keys: I) -> CacheResult<&mut Self>
    where
        I: IntoIterator<Item = K>,
        K: IntoPath,
    {
        for key in keys {
            self.del_path(key.into_path()?)?;
        }
        Ok(self)
    }

    pub fn omit<I, K>(&mut self, keys: I) -> CacheResult<&mut Self>
    where
        I: IntoIterator<Item = K>,
        K: IntoPath,
    {
        self.del_many(keys)
    }

    /// Empty the store, emitting `del` once per top-level key and then
    /// `clear`.
    pub fn del_all(&mut self) -> CacheResult<&mut Self> {
        let removed = self.keys();
        self.store = empty_object();
        debug!(keys = removed.len(), "del all");
        for key in removed {
            self.emit(Event::Del {
                key: Path::literal(key).to_string(),
            })?;
        }
        self.emit(Event::Clear)?;
        Ok(self)
    }

    /// Replace the store with an empty object and emit `clear`. Defaults
    /// and options are untouched.
    pub fn clear(&mut self) -> CacheResult<&mut Self> {
        self.store = empty_object();
        debug!("clear");
        self.emit(Event::Clear)?;
        Ok(self)
    }

    // ---- Defaults ----

    /// Write `value` into the defaults layer and emit `default`.
    pub fn set_default(&mut self, key: impl IntoPath, value: impl Into<Value>) -> CacheResult<&mut Self> {
        let path = key.into_path()?;
        self.write_default(path, value.into())
    }

    pub fn set_defaults(&mut self, input: Value) -> CacheResult<&mut Self> {
        self.visit(VisitOp::Default, input)
    }

    fn write_default(&mut self, path: Path, value: Value) -> CacheResult<&mut Self> {
        path::set(&mut self.defaults, &path, value.clone())?;
        debug!(key = %path, "default");
        self.emit(Event::Default {
            key: path.to_string(),
            value,
        })?;
        Ok(self)
    }

    /// The defaults layer's value at `key`, ignoring the store.
    pub fn get_default(&self, key: impl IntoPath) -> CacheResult<Option<&Value>> {
        let path = key.into_path()?;
        Ok(path::get(&self.defaults, &path))
    }

    pub fn defaults(&self) -> &Value {
        &self.defaults
    }

    pub fn reset_defaults(&mut self) {
        self.defaults = empty_object();
        debug!("defaults reset");
    }

    // ---- Options ----

    pub fn set_option(&mut self, key: impl IntoPath, value: impl Into<Value>) -> CacheResult<&mut Self> {
        let path = key.into_path()?;
        self.write_option(path, value.into())
    }

    pub fn set_options(&mut self, input: Value) -> CacheResult<&mut Self> {
        self.visit(VisitOp::Option, input)
    }

    fn write_option(&mut self, path: Path, value: Value) -> CacheResult<&mut Self> {
        path::set(&mut self.options, &path, value.clone())?;
        debug!(key = %path, "option");
        self.emit(Event::Option {
            key: path.to_string(),
            value,
        })?;
        Ok(self)
    }

    pub fn option(&self, key: impl IntoPath) -> CacheResult<Option<&Value>> {
        let path = key.into_path()?;
        Ok(path::get(&self.options, &path))
    }

    pub fn options(&self) -> &Value {
        &self.options
    }

    fn object_at(&self, path: &Path) -> Value {
        match path::get(&self.store, path) {
            Some(value @ Value::Object(_)) => value.clone(),
            _ => empty_object(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn object_sources<I>(sources: I) -> CacheResult<Vec<Value>>
where
    I: IntoIterator<Item = Value>,
{
    sources
        .into_iter()
        .map(|source| match source {
            Value::Object(_) => Ok(source),
            other => Err(merge::MergeError::NotAnObject {
                found: merge::value_kind(&other),
            }
            .into()),
        })
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_empty_object(value: &Value) -> bool {
    value.as_object().map_or(true, Map::is_empty)
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field(&self.config.storage_field, &self.store)
            .field("defaults", &self.defaults)
            .field("options", &self.options)
            .field("events", &self.events)
            .finish()
    }
}

impl Serialize for Cache {
    /// `{ <storage_field>: store, "defaults": ..., "options": ... }`, with
    /// empty layers left out.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(&self.config.storage_field, &self.store)?;
        if !is_empty_object(&self.defaults) {
            map.serialize_entry("defaults", &self.defaults)?;
        }
        if !is_empty_object(&self.options) {
            map.serialize_entry("options", &self.options)?;
        }
        map.end()
    }
}

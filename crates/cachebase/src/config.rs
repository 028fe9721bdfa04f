use serde::{Deserialize, Serialize};

use crate::error::{CacheError, CacheResult};

/// Field names the serialized form already uses for the other layers.
const RESERVED_FIELDS: &[&str] = &["defaults", "options"];

/// Configuration for a [`Cache`](crate::Cache).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Name the primary store is published under when the cache is
    /// serialized or debug-printed.
    pub storage_field: String,
    /// Whether `get`, `has` and `hasOwn` events are emitted. Mutation
    /// events are always emitted.
    pub emit_read_events: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            storage_field: Self::DEFAULT_STORAGE_FIELD.to_string(),
            emit_read_events: true,
        }
    }
}

impl CacheConfig {
    pub const DEFAULT_STORAGE_FIELD: &'static str = "cache";

    /// Default configuration with the store published under `field`.
    pub fn named(field: impl Into<String>) -> Self {
        Self {
            storage_field: field.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    ///
    /// ```
    /// use cachebase::CacheConfig;
    ///
    /// let config = CacheConfig::from_toml_str("storage_field = \"data\"").unwrap();
    /// assert_eq!(config.storage_field, "data");
    /// assert!(config.emit_read_events);
    /// ```
    pub fn from_toml_str(input: &str) -> CacheResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CacheResult<()> {
        if self.storage_field.is_empty() {
            return Err(CacheError::Config("storage_field must not be empty".into()));
        }
        if RESERVED_FIELDS.contains(&self.storage_field.as_str()) {
            return Err(CacheError::Config(format!(
                "storage_field {:?} is reserved",
                self.storage_field
            )));
        }
        Ok(())
    }
}

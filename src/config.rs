//! # Catalog Configuration
//!
//! TOML or JSON, every section optional:
//!
//! ```toml
//! [logging]
//! level = "debug"
//! json = false
//! color = true
//!
//! [pool]
//! objects = ["Obj1", "Obj2"]
//!
//! [flyweight]
//! preload = ["SharedState"]
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;
use crate::flyweight::FlyweightFactory;
use crate::pool::{ObjectPool, PooledObject};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            json: false,
            color: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Ids of the objects seeded into the pool, in borrow order.
    pub objects: Vec<String>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            objects: vec!["Obj1".to_string(), "Obj2".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlyweightConfig {
    pub preload: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub logging: LoggingConfig,
    pub pool: PoolConfig,
    pub flyweight: FlyweightConfig,
}

impl CatalogConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::from_toml(err, content))
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Picks the format from the extension, otherwise sniffs for a leading `{`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match format.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => {
                if content.trim_start().starts_with('{') {
                    Self::from_json_str(&content)
                } else {
                    Self::from_toml_str(&content)
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!("'{}' is not one of {}", self.logging.level, LEVELS.join(", ")),
            ));
        }

        if self.pool.objects.is_empty() {
            return Err(ConfigError::invalid_value(
                "pool.objects",
                "at least one object id is required",
            ));
        }

        let mut seen = HashSet::new();
        for id in &self.pool.objects {
            if id.trim().is_empty() {
                return Err(ConfigError::invalid_value("pool.objects", "object ids must not be empty"));
            }
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::invalid_value(
                    "pool.objects",
                    format!("duplicate object id '{id}'"),
                ));
            }
        }

        if self.flyweight.preload.iter().any(|key| key.is_empty()) {
            return Err(ConfigError::invalid_value("flyweight.preload", "keys must not be empty"));
        }

        Ok(())
    }

    /// A pool seeded with the configured objects, in order.
    pub fn build_pool(&self, diagnostics: &Diagnostics) -> ObjectPool<PooledObject> {
        let mut pool = ObjectPool::new();
        for id in &self.pool.objects {
            pool.add_object(PooledObject::with_diagnostics(id.clone(), diagnostics.clone()));
        }
        pool
    }

    /// A factory with every preload key already interned.
    pub fn build_factory(&self, diagnostics: &Diagnostics) -> FlyweightFactory {
        let mut factory = FlyweightFactory::with_diagnostics(diagnostics.clone());
        for key in &self.flyweight.preload {
            factory.get_flyweight(key);
        }
        factory
    }
}

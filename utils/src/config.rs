use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use heck::ToShoutySnakeCase;
use serde_yaml::Value;
use stack_defs::{ConfigError, Secret};

/// Source of provider configuration, addressed as `namespace:key`
/// (for example `gcp:project` or `aws:accessKey`).
pub trait ConfigStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String>;

    fn require(&self, namespace: &str, key: &str) -> Result<String, ConfigError> {
        match self.get(namespace, key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::Missing {
                namespace: namespace.to_string(),
                key: key.to_string(),
            }),
        }
    }

    fn require_secret(&self, namespace: &str, key: &str) -> Result<Secret, ConfigError> {
        self.require(namespace, key).map(Secret::new)
    }
}

/// Reads `namespace:key` from the environment variable
/// `{PREFIX_}{NAMESPACE}_{KEY}`, e.g. `aws:accessKey` -> `AWS_ACCESS_KEY`.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigStore {
    prefix: Option<String>,
}

impl EnvConfigStore {
    pub fn new() -> Self {
        EnvConfigStore { prefix: None }
    }

    pub fn with_prefix(prefix: &str) -> Self {
        EnvConfigStore {
            prefix: Some(prefix.to_shouty_snake_case()),
        }
    }

    pub fn variable_name(&self, namespace: &str, key: &str) -> String {
        let name = format!(
            "{}_{}",
            namespace.to_shouty_snake_case(),
            key.to_shouty_snake_case()
        );
        match &self.prefix {
            Some(prefix) => format!("{}_{}", prefix, name),
            None => name,
        }
    }
}

impl ConfigStore for EnvConfigStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        env::var(self.variable_name(namespace, key)).ok()
    }
}

/// In-memory store, usually loaded from a YAML document shaped like
/// `{gcp: {project: ..., region: ...}, aws: {...}}`.
#[derive(Debug, Clone, Default)]
pub struct MapConfigStore {
    values: BTreeMap<String, BTreeMap<String, String>>,
}

impl MapConfigStore {
    pub fn new() -> Self {
        MapConfigStore::default()
    }

    pub fn set(mut self, namespace: &str, key: &str, value: impl Into<String>) -> Self {
        self.values
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
        self
    }

    /// Scalars are read as strings, so `project: 123456` and
    /// `project: "123456"` are the same value.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let document: Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Unreadable(e.to_string()))?;
        let namespaces = match document {
            Value::Mapping(namespaces) => namespaces,
            Value::Null => return Ok(MapConfigStore::new()),
            _ => {
                return Err(ConfigError::Unreadable(
                    "expected a mapping of namespaces".to_string(),
                ))
            }
        };

        let mut store = MapConfigStore::new();
        for (namespace, entries) in namespaces {
            let namespace = scalar_string(&namespace).ok_or_else(|| {
                ConfigError::Unreadable("namespace names must be scalars".to_string())
            })?;
            let entries = match entries {
                Value::Mapping(entries) => entries,
                Value::Null => continue,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: namespace,
                        reason: "expected a mapping of keys".to_string(),
                    })
                }
            };
            for (key, value) in entries {
                let key = scalar_string(&key).ok_or_else(|| ConfigError::InvalidValue {
                    field: namespace.clone(),
                    reason: "keys must be scalars".to_string(),
                })?;
                let value = scalar_string(&value).ok_or_else(|| ConfigError::InvalidValue {
                    field: format!("{}:{}", namespace, key),
                    reason: "expected a string, number or boolean".to_string(),
                })?;
                store = store.set(&namespace, &key, value);
            }
        }
        Ok(store)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(format!("{}: {}", path.display(), e)))?;
        MapConfigStore::from_yaml(&content)
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl ConfigStore for MapConfigStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        self.values.get(namespace)?.get(key).cloned()
    }
}

/// Looks a key up in each store in turn; the first store that has it wins.
#[derive(Default)]
pub struct LayeredConfigStore {
    layers: Vec<Box<dyn ConfigStore>>,
}

impl LayeredConfigStore {
    pub fn new() -> Self {
        LayeredConfigStore::default()
    }

    pub fn layer(mut self, store: impl ConfigStore + 'static) -> Self {
        self.layers.push(Box::new(store));
        self
    }
}

impl ConfigStore for LayeredConfigStore {
    fn get(&self, namespace: &str, key: &str) -> Option<String> {
        self.layers
            .iter()
            .find_map(|store| store.get(namespace, key))
    }
}

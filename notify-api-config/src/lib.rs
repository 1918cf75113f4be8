// Configuration management for the Notify dispatcher

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use env::{DEFAULT_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{MAX_TIMEOUT_SECS, NotifySettings};
pub use validation::{ConfigValidator, Validate};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

/// Layered settings store. Later loads override earlier ones.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    values: Map<String, Value>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    /// Create an empty manager reading `NOTIFY_API_*` variables
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            values: Map::new(),
            env_prefix: Some(prefix.into()),
        }
    }

    /// Load settings from environment variables
    pub fn load_env(&mut self) -> Result<&mut Self> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.values.extend(loader.load()?);
        Ok(self)
    }

    /// Load a .env file, then the environment
    pub fn load_dotenv(&mut self, path: Option<&Path>) -> Result<&mut Self> {
        EnvLoader::new(self.env_prefix.clone()).load_dotenv(path)?;
        self.load_env()
    }

    /// Load settings from file, format picked by extension
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let loader = ConfigLoader::auto(path.as_ref())?;
        self.values.extend(loader.load_file(path)?);
        Ok(self)
    }

    /// Set a value
    pub fn set<T: serde::Serialize>(&mut self, key: &str, value: T) -> Result<&mut Self> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;
        self.values.insert(key.to_string(), json_value);
        Ok(self)
    }

    /// Get a value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))
    }

    /// Check if a key exists
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Deserialize and validate the whole store
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let validated: T = serde_json::from_value(Value::Object(self.values.clone()))
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        validated.validate()?;

        Ok(validated)
    }

    /// Validated notify settings
    pub fn settings(&self) -> Result<NotifySettings> {
        self.load_validated()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

// Environment variable loading

use crate::{ConfigError, Result};
use serde_json::{Map, Value};
use std::env;
use std::path::Path;

/// Prefix used when none is given.
pub const DEFAULT_PREFIX: &str = "NOTIFY_API";

/// Environment variable loader
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    /// Create a new environment loader
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load a `.env` file into the process environment.
    ///
    /// Without a path a missing `.env` is ignored.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Ok(())
    }

    /// Load all matching environment variables as settings.
    ///
    /// With a prefix, `NOTIFY_API_DEVICE_ID` becomes `device_id`. Numeric
    /// values are kept as numbers so `timeout_secs` deserializes.
    pub fn load(&self) -> Result<Map<String, Value>> {
        let mut config = Map::new();

        for (key, value) in env::vars() {
            let key = match self.prefix {
                Some(ref prefix) => match key
                    .strip_prefix(prefix.as_str())
                    .and_then(|rest| rest.strip_prefix('_'))
                {
                    Some(rest) => rest.to_lowercase(),
                    None => continue,
                },
                None => key.to_lowercase(),
            };
            if key.is_empty() {
                continue;
            }

            let value = setting_value(&key, value);
            config.insert(key, value);
        }

        Ok(config)
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(Some(DEFAULT_PREFIX.to_string()))
    }
}

/// Type a raw `KEY=value` setting. `*_secs` values that parse as integers
/// become numbers; everything else stays a string.
pub(crate) fn setting_value(key: &str, value: String) -> Value {
    match value.parse::<u64>() {
        Ok(number) if key.ends_with("_secs") => Value::from(number),
        _ => Value::String(value),
    }
}

mod loader;
pub mod value;

use std::path::Path;

use loader::Values;

pub use value::{ConfigValue, FromConfigValue};

/// Environment variable that selects the active profile.
pub const PROFILE_ENV: &str = "ORDERDESK_PROFILE";

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// The requested key was not found in the configuration.
    NotFound(String),
    /// The value could not be converted to the requested type.
    TypeMismatch { key: String, expected: &'static str },
    /// An I/O or YAML parsing error occurred while loading config files.
    Load(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(key) => write!(f, "Config key not found: {key}"),
            ConfigError::TypeMismatch { key, expected } => {
                write!(f, "Config type mismatch for '{key}': expected {expected}")
            }
            ConfigError::Load(msg) => write!(f, "Config load error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Application configuration loaded from YAML files, `.env` files, and environment variables.
///
/// Resolution order (lowest to highest priority):
/// 1. `application.yaml` (base)
/// 2. `application-{profile}.yaml` (profile override)
/// 3. `.env` then `.env.{profile}` (loaded into the process environment)
/// 4. Environment variables (`DATABASE_URL` overrides `database.url`)
///
/// `.env` files never overwrite already-set environment variables.
///
/// Profile is determined by: `ORDERDESK_PROFILE` env var > argument.
#[derive(Debug, Clone)]
pub struct Config {
    values: Values,
    profile: String,
}

impl Config {
    /// Load configuration for the given profile from the current working directory.
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from(Path::new("."), profile)
    }

    /// Load configuration for the given profile, looking for files in `dir`.
    pub fn load_from(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile = std::env::var(PROFILE_ENV).unwrap_or_else(|_| profile.to_string());

        let mut values = Values::new();
        for file in ["application.yaml".to_string(), format!("application-{profile}.yaml")] {
            loader::merge_file(&dir.join(file), &mut values)?;
        }

        for file in [".env".to_string(), format!(".env.{profile}")] {
            if let Err(e) = dotenvy::from_path(dir.join(&file)) {
                if !e.not_found() {
                    return Err(ConfigError::Load(format!("{file}: {e}")));
                }
            }
        }

        // SERVER_PORT -> server.port
        values.extend(std::env::vars().map(|(name, value)| {
            (name.to_lowercase().replace('_', "."), ConfigValue::Text(value))
        }));

        Ok(Config { values, profile })
    }

    /// Create a config from a YAML string (useful for testing).
    pub fn from_yaml_str(yaml: &str, profile: &str) -> Result<Self, ConfigError> {
        let mut values = Values::new();
        loader::merge_str(yaml, &mut values)?;
        Ok(Config {
            values,
            profile: profile.to_string(),
        })
    }

    /// An empty config under the `test` profile.
    pub fn empty() -> Self {
        Config {
            values: Values::new(),
            profile: "test".to_string(),
        }
    }

    /// Set a value programmatically.
    pub fn set(&mut self, key: &str, value: impl Into<ConfigValue>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Get a typed value for the given dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the key does not exist, or
    /// `ConfigError::TypeMismatch` if the value cannot be converted.
    pub fn get<V: FromConfigValue>(&self, key: &str) -> Result<V, ConfigError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))?;
        V::from_config_value(value, key)
    }

    /// Get a typed value, returning `default` only if the key is missing.
    ///
    /// A present but malformed value is still an error.
    pub fn get_or<V: FromConfigValue>(&self, key: &str, default: V) -> Result<V, ConfigError> {
        match self.get(key) {
            Err(ConfigError::NotFound(_)) => Ok(default),
            other => other,
        }
    }

    /// The active profile name.
    pub fn profile(&self) -> &str {
        &self.profile
    }
}

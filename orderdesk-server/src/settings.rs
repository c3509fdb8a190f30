//! Typed view of the layered [`Config`].
//!
//! | Key                     | Default          |
//! |-------------------------|------------------|
//! | `server.host`           | `0.0.0.0`        |
//! | `server.port`           | `5000`           |
//! | `database.url`          | required         |
//! | `database.pool.size`    | `10`             |
//! | `database.pool.timeout` | `5` (seconds)    |
//! | `database.setup`        | `false`          |
//! | `cors.origins`          | empty            |
//! | `logging.json`          | `false`          |
//! | `app.production`        | `false`          |
//!
//! `database.url: memory` selects the in-memory store. The `production`
//! profile implies `app.production`.

use orderdesk_core::{Config, ConfigError};

/// `database.url` value that selects the in-memory store.
pub const MEMORY_URL: &str = "memory";

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub pool_size: u32,
    pub acquire_timeout_secs: u64,
    /// Run migrations and seed the catalog on boot.
    pub setup: bool,
}

impl DatabaseSettings {
    pub fn is_memory(&self) -> bool {
        self.url == MEMORY_URL
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: DatabaseSettings,
    pub cors_origins: Vec<String>,
    pub json_logs: bool,
    pub production: bool,
}

impl Settings {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let database = DatabaseSettings {
            url: config.get("database.url")?,
            pool_size: config.get_or("database.pool.size", 10)?,
            acquire_timeout_secs: config.get_or("database.pool.timeout", 5)?,
            setup: config.get_or("database.setup", false)?,
        };

        Ok(Settings {
            host: config.get_or("server.host", "0.0.0.0".to_string())?,
            port: config.get_or("server.port", 5000)?,
            database,
            cors_origins: config.get_or("cors.origins", Vec::new())?,
            json_logs: config.get_or("logging.json", false)?,
            production: config.profile() == "production" || config.get_or("app.production", false)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! Configuration management for the exchange wallet tools.

use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;

/// Environment variable holding the signing key.
pub const WALLET_PRIVATE_KEY_VAR: &str = "WALLET_PRIVATE_KEY";

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Hex private key of the default signing wallet.
    pub private_key: Option<String>,
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    #[allow(clippy::result_large_err)]
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| Error::Config {
                    message: "DATABASE_URL environment variable not set".to_string(),
                })?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
            },
            wallet: WalletConfig {
                private_key: env::var(WALLET_PRIVATE_KEY_VAR).ok(),
            },
        })
    }

    /// Load configuration from a file, with `EXCHANGE__SECTION__KEY`
    /// environment variables taking precedence.
    #[allow(clippy::result_large_err)]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix("EXCHANGE").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load configuration for testing (with defaults).
    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgres://localhost/exchange_test".to_string(),
                max_connections: 2,
            },
            wallet: WalletConfig::default(),
        }
    }
}

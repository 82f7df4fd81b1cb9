//! Front-desk configuration.
//!
//! Read from `ORTHONOVA_*` environment variables, optionally layered over a
//! file named by `ORTHONOVA_CONFIG_FILE`. There are no built-in endpoints or
//! keys: a store must be configured explicitly.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{RestStore, SqliteStore, Store, StoreResult};

/// Prefix of all environment variables.
pub const ENV_PREFIX: &str = "ORTHONOVA";

/// Variable naming an optional configuration file.
pub const CONFIG_FILE_VAR: &str = "ORTHONOVA_CONFIG_FILE";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error(
        "No store configured: set ORTHONOVA_STORE_URL and ORTHONOVA_ANON_KEY, \
         or ORTHONOVA_DATABASE_PATH"
    )]
    Missing,

    #[error("Incomplete store configuration: {0} is set but {1} is not")]
    Incomplete(&'static str, &'static str),

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Raw configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeskConfig {
    /// Remote store endpoint
    pub store_url: Option<String>,
    /// Anonymous access key for the remote store
    pub anon_key: Option<String>,
    /// Local SQLite store, used when no remote store is configured
    pub database_path: Option<PathBuf>,
    /// Per-request timeout for the remote store
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Where records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Rest {
        url: String,
        anon_key: String,
        timeout: Duration,
    },
    Sqlite {
        path: PathBuf,
    },
}

impl DeskConfig {
    /// Loads the configuration from environment variables and the optional
    /// configuration file.
    pub fn load() -> ConfigResult<Self> {
        let file = std::env::var(CONFIG_FILE_VAR).ok().map(PathBuf::from);
        Self::load_with(config::Environment::with_prefix(ENV_PREFIX), file.as_deref())
    }

    /// Load from an explicit environment source. Environment values override
    /// file values.
    pub fn load_with(env: config::Environment, file: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let cfg = builder
            .add_source(env)
            .build()?
            .try_deserialize::<Self>()?;

        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Resolve the configured backend. A complete remote configuration wins
    /// over a database path.
    pub fn backend(&self) -> ConfigResult<StoreBackend> {
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout);
        }

        let url = self.store_url.as_deref().filter(|s| !s.trim().is_empty());
        let key = self.anon_key.as_deref().filter(|s| !s.trim().is_empty());

        match (url, key) {
            (Some(url), Some(key)) => Ok(StoreBackend::Rest {
                url: url.to_string(),
                anon_key: key.to_string(),
                timeout: self.request_timeout(),
            }),
            (Some(_), None) => Err(ConfigError::Incomplete("store_url", "anon_key")),
            (None, Some(_)) => Err(ConfigError::Incomplete("anon_key", "store_url")),
            (None, None) => self
                .database_path
                .clone()
                .map(|path| StoreBackend::Sqlite { path })
                .ok_or(ConfigError::Missing),
        }
    }
}

impl StoreBackend {
    /// Open the store this backend describes.
    pub fn connect(&self) -> StoreResult<Arc<dyn Store>> {
        Ok(match self {
            StoreBackend::Rest {
                url,
                anon_key,
                timeout,
            } => Arc::new(RestStore::new(url, anon_key, *timeout)?),
            StoreBackend::Sqlite { path } => Arc::new(SqliteStore::open(path)?),
        })
    }
}

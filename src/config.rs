//! Connection and cache configuration.
//!
//! Settings live in a TOML file (`database.toml`) with a `[database]` section
//! plus optional `[cache]` and `[session]` sections. The file is read once at
//! startup and the resulting [`AppConfig`] is passed explicitly to whatever
//! needs it; there is no ambient global configuration state.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CourtError, Result};

/// Env var pointing at an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "COURTSIDE_CONFIG";
/// Env var overriding `database.host` from the file.
pub const DB_HOST_ENV_VAR: &str = "COURTSIDE_DB_HOST";
/// Env var overriding `database.password` from the file.
pub const DB_PASSWORD_ENV_VAR: &str = "COURTSIDE_DB_PASSWORD";

const CONFIG_FILE_NAME: &str = "database.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Connection parameters for the PostgreSQL store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub dbname: String,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Result cache sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

/// Store session behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Open read sessions as `BEGIN READ ONLY`. The closing `COMMIT` is always
    /// issued to end the transaction; with `read_only` set it cannot persist
    /// anything.
    #[serde(default = "default_read_only")]
    pub read_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            read_only: default_read_only(),
        }
    }
}

fn default_port() -> u16 {
    5432
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_entries() -> usize {
    256
}

fn default_read_only() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from a specific TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CourtError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: AppConfig =
            toml::from_str(&content).map_err(|source| CourtError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file location and load it.
    ///
    /// Search order: explicit `--config` path, `$COURTSIDE_CONFIG`,
    /// `./database.toml`, then `<config dir>/courtside/database.toml`. The
    /// first existing candidate wins; if none exists the error lists every
    /// path that was tried.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            candidates.push(PathBuf::from(path));
        }
        candidates.push(PathBuf::from(CONFIG_FILE_NAME));
        if let Some(base) = dirs::config_dir() {
            candidates.push(base.join("courtside").join(CONFIG_FILE_NAME));
        }

        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(path),
            None => Err(CourtError::ConfigNotFound {
                searched: candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Environment variables take precedence over file values, so credentials
    /// can stay out of the file entirely.
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var(DB_HOST_ENV_VAR) {
            self.database.host = host;
        }
        if let Ok(password) = std::env::var(DB_PASSWORD_ENV_VAR) {
            self.database.password = password;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.database.port == 0 {
            return Err(CourtError::ConfigInvalid {
                message: "database.port cannot be 0".to_string(),
            });
        }
        if self.database.host.is_empty() {
            return Err(CourtError::ConfigInvalid {
                message: "database.host cannot be empty".to_string(),
            });
        }
        if self.cache.max_entries == 0 {
            return Err(CourtError::ConfigInvalid {
                message: "cache.max_entries cannot be 0".to_string(),
            });
        }
        Ok(())
    }
}

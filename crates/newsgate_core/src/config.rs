//! Gateway settings.
//!
//! # Responsibility
//! - Carry the connection locator and pool sizing for the record gateway.
//! - Load settings from TOML and apply `NEWSGATE_*` environment overrides.
//!
//! # Invariants
//! - A validated config has a non-empty database path, at least one pooled
//!   connection and a non-zero acquisition timeout.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DATABASE_PATH: &str = "NEWSGATE_DATABASE_PATH";
pub const ENV_MAX_CONNECTIONS: &str = "NEWSGATE_MAX_CONNECTIONS";
pub const ENV_LOG_LEVEL: &str = "NEWSGATE_LOG_LEVEL";

const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 60;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Settings for one gateway instance and its connection pool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// SQLite database file; created on first open.
    pub database_path: PathBuf,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// How long a call waits for a free pooled connection.
    #[serde(default = "default_connection_timeout_secs")]
    pub connection_timeout_secs: u64,
    /// How long SQLite waits on a locked database before failing a statement.
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
    #[serde(default)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging stays off when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl GatewayConfig {
    /// Creates a config for `database_path` with default pool settings.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connection_timeout_secs: DEFAULT_CONNECTION_TIMEOUT_SECS,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
            log_level: None,
            log_dir: None,
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Applies `NEWSGATE_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides resolved through `lookup`, then re-validates.
    pub fn apply_overrides_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<()> {
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_MAX_CONNECTIONS) {
            self.max_connections = raw.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "{ENV_MAX_CONNECTIONS} must be a positive integer, got `{raw}`"
                ))
            })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = Some(level);
        }
        self.validate()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "database_path cannot be empty".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "max_connections must be at least 1".to_string(),
            ));
        }
        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "connection_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Never zero; `r2d2` rejects a zero acquisition timeout.
    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs.max(1))
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_connection_timeout_secs() -> u64 {
    DEFAULT_CONNECTION_TIMEOUT_SECS
}

fn default_busy_timeout_secs() -> u64 {
    DEFAULT_BUSY_TIMEOUT_SECS
}

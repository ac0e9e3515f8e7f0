//! Configuration loading
//!
//! Every setting resolves with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (a `.env` file in the working directory counts)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The binary's clap arguments read `CONFHUB_CONFIG`, `CONFHUB_DATABASE`,
//! `CONFHUB_HOST` and `CONFHUB_PORT` themselves, so those arrive here already
//! folded into [`CliOverrides`]. Settings without a command-line flag are read
//! from the environment by [`Config::resolve`].

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_CONFIG_FILE: &str = "CONFHUB_CONFIG";
pub const ENV_DATABASE_PATH: &str = "CONFHUB_DATABASE";
pub const ENV_MAX_CONNECTIONS: &str = "CONFHUB_MAX_CONNECTIONS";
pub const ENV_HOST: &str = "CONFHUB_HOST";
pub const ENV_PORT: &str = "CONFHUB_PORT";
pub const ENV_APP_NAME: &str = "APP_NAME";
pub const ENV_APP_VERSION: &str = "APP_VERSION";
pub const ENV_APP_ENV: &str = "APP_ENV";

/// Compiled defaults used when nothing else provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults;

impl CompiledDefaults {
    pub const DATABASE_PATH: &'static str = "confhub.db";
    pub const MAX_CONNECTIONS: u32 = 5;
    pub const HOST: &'static str = "127.0.0.1";
    pub const PORT: u16 = 5800;
    pub const APP_NAME: &'static str = "Conference API";
    pub const APP_VERSION: &'static str = "1.0.0";
    pub const APP_ENV: &'static str = "development";
}

/// Storage connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Application metadata reported by the service
#[derive(Debug, Clone, PartialEq)]
pub struct AppMetadata {
    pub name: String,
    pub version: String,
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: CompiledDefaults::APP_NAME.to_string(),
            version: CompiledDefaults::APP_VERSION.to_string(),
            environment: CompiledDefaults::APP_ENV.to_string(),
        }
    }
}

/// Fully resolved process configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub app: AppMetadata,
}

/// `[database]` table of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlDatabase {
    pub path: Option<PathBuf>,
    pub max_connections: Option<u32>,
}

/// `[server]` table of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlServer {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// `[app]` table of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlApp {
    pub name: Option<String>,
    pub version: Option<String>,
    pub environment: Option<String>,
}

/// On-disk configuration file; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database: TomlDatabase,
    pub server: TomlServer,
    pub app: TomlApp,
}

impl TomlConfig {
    /// Load a TOML config file.
    ///
    /// A missing file is not fatal: a warning is logged and empty settings
    /// are returned. A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!("Config file not found: {} (using defaults)", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Values supplied on the command line or through their clap-bound
/// environment variables
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Load `.env` from the working directory if present.
///
/// Returns the path that was loaded. Variables already set in the process
/// environment are not overwritten.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}

impl Config {
    /// Resolve the final configuration from CLI values, environment and file
    pub fn resolve(cli: &CliOverrides, file: &TomlConfig) -> Result<Self> {
        let path = cli
            .database
            .clone()
            .or_else(|| file.database.path.clone())
            .unwrap_or_else(|| PathBuf::from(CompiledDefaults::DATABASE_PATH));

        let max_connections = match env_parsed::<u32>(ENV_MAX_CONNECTIONS)? {
            Some(n) => n,
            None => file
                .database
                .max_connections
                .unwrap_or(CompiledDefaults::MAX_CONNECTIONS),
        };
        if max_connections == 0 {
            return Err(Error::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        let host = cli
            .host
            .clone()
            .or_else(|| file.server.host.clone())
            .unwrap_or_else(|| CompiledDefaults::HOST.to_string());

        let port = cli
            .port
            .or(file.server.port)
            .unwrap_or(CompiledDefaults::PORT);

        let app = AppMetadata {
            name: env_string(ENV_APP_NAME)
                .or_else(|| file.app.name.clone())
                .unwrap_or_else(|| CompiledDefaults::APP_NAME.to_string()),
            version: env_string(ENV_APP_VERSION)
                .or_else(|| file.app.version.clone())
                .unwrap_or_else(|| CompiledDefaults::APP_VERSION.to_string()),
            environment: env_string(ENV_APP_ENV)
                .or_else(|| file.app.environment.clone())
                .unwrap_or_else(|| CompiledDefaults::APP_ENV.to_string()),
        };

        Ok(Self {
            database: DatabaseConfig {
                path,
                max_connections,
            },
            server: ServerConfig { host, port },
            app,
        })
    }
}

/// Non-empty environment variable value
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env_string(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        None => Ok(None),
    }
}

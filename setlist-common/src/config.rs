//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Command-line and environment values arrive together as [`Overrides`]
//! (clap merges them); this module layers them over the TOML file.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 5780;

/// Default HTTP listen address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Database file name inside the data folder
pub const DATABASE_FILE_NAME: &str = "setlist.db";

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional in the file; absent fields take compiled defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// HTTP listen address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Reference date for the featured performer rotation
    #[serde(default = "default_featured_epoch")]
    pub featured_epoch: NaiveDate,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
}

/// Fully resolved startup settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub featured_epoch: NaiveDate,
    pub log_level: String,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

/// 2024-05-10, the first day of the rotation
pub fn default_featured_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 10).unwrap_or_default()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            host: default_host(),
            port: default_port(),
            featured_epoch: default_featured_epoch(),
            logging: LoggingConfig::default(),
        }
    }
}

impl TomlConfig {
    /// Load configuration from a TOML file
    ///
    /// Fails if the file cannot be read or does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load configuration, falling back to defaults
    ///
    /// `path` of `None` means the platform default location. A missing or
    /// unreadable file is never fatal: a warning is logged and compiled
    /// defaults are used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => path,
            None => {
                warn!("Could not determine config directory, using defaults");
                return Self::default();
            }
        };

        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }

    /// Layer command-line/environment overrides over this file's values
    pub fn resolve(self, overrides: Overrides) -> ResolvedConfig {
        let database_path = overrides
            .database_path
            .or(self.database_path)
            .unwrap_or_else(|| default_data_folder().join(DATABASE_FILE_NAME));

        ResolvedConfig {
            host: overrides.host.unwrap_or(self.host),
            port: overrides.port.unwrap_or(self.port),
            database_path,
            featured_epoch: self.featured_epoch,
            log_level: self.logging.level,
        }
    }
}

/// Platform config file location (`<config_dir>/setlist/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("setlist").join("config.toml"))
}

/// Platform data folder holding the database
pub fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("setlist"))
        .unwrap_or_else(|| PathBuf::from("./setlist_data"))
}

//! Configuration loader using figment.
//!
//! Sources, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. `herald.toml` (or an explicitly given file)
//! 3. Environment variables (`HERALD_*`, `__` as nesting separator)
//!
//! # Environment Variable Mapping
//!
//! - `HERALD_ENGINE__PREFIX="$"` → `engine.prefix = "$"`
//! - `HERALD_ENGINE__BOT_TYPE=guildonly` → `engine.bot_type = "guildonly"`
//! - `HERALD_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//!
//! # Example
//!
//! ```rust,ignore
//! use herald_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//! let config = ConfigLoader::new().file("./conf/herald.toml").load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::debug;

use super::schema::HeraldConfig;
use crate::error::{ConfigError, ConfigResult};

/// Default config file name searched in the working directory.
const DEFAULT_FILE: &str = "herald.toml";

/// Environment variable prefix.
const ENV_PREFIX: &str = "HERALD_";

/// Multi-source configuration loader.
#[derive(Debug)]
pub struct ConfigLoader {
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader with defaults: search `herald.toml`, read env vars.
    pub fn new() -> Self {
        Self {
            config_file: None,
            load_env: true,
        }
    }

    /// Loads from a specific file instead of searching.
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enables or disables the environment variable layer.
    pub fn with_env(mut self, enabled: bool) -> Self {
        self.load_env = enabled;
        self
    }

    /// Extracts the merged configuration.
    pub fn load(self) -> ConfigResult<HeraldConfig> {
        let mut figment = Figment::from(Serialized::defaults(HeraldConfig::default()));

        match &self.config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound(path.clone()));
                }
                debug!(path = %path.display(), "loading configuration file");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                // The default file is optional.
                figment = figment.merge(Toml::file(DEFAULT_FILE));
            }
        }

        if self.load_env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        figment.extract().map_err(ConfigError::from)
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<HeraldConfig> {
    ConfigLoader::new().load()
}

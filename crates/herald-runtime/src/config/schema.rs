//! Configuration schema definitions.

use std::collections::HashMap;
use std::time::Duration;

use herald_framework::BotType;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HeraldConfig {
    /// Dispatch engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dispatch engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Literal command prefix.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Sender-eligibility mode: `normal`, `self`, or `guildonly`.
    #[serde(default)]
    pub bot_type: BotType,

    /// The single trusted superuser identity.
    #[serde(default)]
    pub superuser: Option<String>,

    /// Whether to schedule deletion of triggering messages after dispatch.
    #[serde(default)]
    pub delete_command_message: bool,

    /// Milliseconds before scheduled deletions fire.
    #[serde(default)]
    pub delete_message_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            bot_type: BotType::default(),
            superuser: None,
            delete_command_message: false,
            delete_message_delay_ms: 0,
        }
    }
}

impl EngineConfig {
    /// The deletion delay as a [`Duration`].
    pub fn delete_message_delay(&self) -> Duration {
        Duration::from_millis(self.delete_message_delay_ms)
    }
}

fn default_prefix() -> String {
    "!".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Per-module directives, e.g. `herald_framework = "debug"`.
    #[serde(default)]
    pub filters: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            filters: HashMap::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HeraldConfig::default();
        assert_eq!(config.engine.prefix, "!");
        assert_eq!(config.engine.bot_type, BotType::Normal);
        assert!(!config.engine.delete_command_message);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_bot_type_names() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"bot_type": "guildonly"}"#).unwrap();
        assert_eq!(config.bot_type, BotType::GuildOnly);
        let config: EngineConfig = serde_json::from_str(r#"{"bot_type": "self"}"#).unwrap();
        assert_eq!(config.bot_type, BotType::SelfBot);
    }
}

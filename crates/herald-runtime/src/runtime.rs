//! Engine wiring.

use std::sync::Arc;

use herald_core::RoleStore;
use herald_framework::{Engine, EngineBuilder};

use crate::config::EngineConfig;

/// Translates an [`EngineConfig`] into an [`EngineBuilder`].
///
/// The role store stays a constructor argument: the runtime wires it in, it
/// never lives in ambient process state.
pub fn engine_builder(config: &EngineConfig, store: Option<Arc<dyn RoleStore>>) -> EngineBuilder {
    let mut builder = Engine::builder()
        .prefix(&config.prefix)
        .bot_type(config.bot_type)
        .delete_command_message(config.delete_command_message)
        .delete_message_delay(config.delete_message_delay());

    if let Some(superuser) = &config.superuser {
        builder = builder.superuser(superuser);
    }
    if let Some(store) = store {
        builder = builder.role_store(store);
    }

    builder
}

/// Builds a ready engine from configuration.
///
/// Commands and middleware are registered by the embedding application on the
/// returned engine before the first message is fed in.
pub fn build_engine(config: &EngineConfig, store: Option<Arc<dyn RoleStore>>) -> Engine {
    engine_builder(config, store).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_framework::BotType;

    #[test]
    fn test_build_engine_from_config() {
        let config = EngineConfig {
            prefix: "$".to_string(),
            bot_type: BotType::GuildOnly,
            superuser: Some("1234".to_string()),
            delete_command_message: true,
            delete_message_delay_ms: 100,
        };

        let engine = build_engine(&config, None);
        assert_eq!(engine.prefix().literal(), "$");
    }
}

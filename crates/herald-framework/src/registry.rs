//! Command registry.
//!
//! The registry holds every registered command behind an opaque identity
//! token, so that many aliases can reference one handler without duplicating
//! its state. Lookups go through two structures with fixed precedence:
//!
//! - an **alias map** from lowercase alias to identity token — exact,
//!   case-insensitive, last registration wins silently;
//! - an ordered **pattern collection** of (regex, identity token) pairs —
//!   every pattern that matches the raw message contributes a candidate, in
//!   registration order, not just the first.
//!
//! One message can therefore resolve to several candidates: the alias match
//! (if any) first, then all matching patterns.

use std::collections::HashMap;
use std::sync::Arc;

use herald_core::Level;
use regex::Regex;
use tracing::debug;
use uuid::Uuid;

use crate::command::{BoxedHandler, Command, Description};
use crate::error::{DispatchError, DispatchResult, RegistryError};
use crate::template::ParamTemplate;

/// Opaque identity token minted at registration time.
///
/// Unique by construction; never reused within an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandId(Uuid);

impl CommandId {
    fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CommandId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A command definition after registration: immutable, identified, and with
/// its template compiled.
pub struct RegisteredCommand {
    id: CommandId,
    name: String,
    is_pattern: bool,
    template: Option<ParamTemplate>,
    require_prefix: bool,
    min_level: Option<Level>,
    description: Option<Description>,
    handler: BoxedHandler,
}

impl RegisteredCommand {
    /// The identity token.
    pub fn id(&self) -> CommandId {
        self.id
    }

    /// Primary alias, or the pattern source for pattern commands.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this command was registered by pattern.
    pub fn is_pattern(&self) -> bool {
        self.is_pattern
    }

    /// The compiled parameter template, if any.
    pub fn template(&self) -> Option<&ParamTemplate> {
        self.template.as_ref()
    }

    /// Whether an explicit prefix is required to invoke this command.
    pub fn requires_prefix(&self) -> bool {
        self.require_prefix
    }

    /// The minimum authorization level, if any.
    pub fn min_level(&self) -> Option<Level> {
        self.min_level
    }

    /// The description block, if any.
    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub(crate) fn handler(&self) -> &BoxedHandler {
        &self.handler
    }
}

impl std::fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("is_pattern", &self.is_pattern)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

/// The command index: alias map, ordered pattern collection, and the command
/// table both point into.
///
/// Written only during the setup phase; dispatch reads it through `&self`.
#[derive(Default)]
pub struct Registry {
    aliases: HashMap<String, CommandId>,
    patterns: Vec<(Regex, CommandId)>,
    commands: HashMap<CommandId, Arc<RegisteredCommand>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command definition, minting its identity token.
    ///
    /// If the definition carries a pattern, the pattern takes precedence and
    /// alias registration is skipped entirely. Otherwise every alias is bound
    /// case-folded, silently overwriting any prior binding — the last
    /// registration for a given alias wins.
    pub fn register(&mut self, command: Command) -> Result<CommandId, RegistryError> {
        let Command {
            aliases,
            pattern,
            template,
            require_prefix,
            min_level,
            description,
            handler,
        } = command;

        let handler = handler.ok_or(RegistryError::MissingHandler)?;
        if pattern.is_none() && aliases.iter().all(|a| a.is_empty()) {
            return Err(RegistryError::NoAliases);
        }

        let template = template.as_deref().map(ParamTemplate::parse).transpose()?;
        let id = CommandId::mint();
        let is_pattern = pattern.is_some();

        let name = match &pattern {
            Some(p) => p.as_str().to_string(),
            None => aliases[0].clone(),
        };

        let registered = Arc::new(RegisteredCommand {
            id,
            name,
            is_pattern,
            template,
            // Pattern commands match independently of the prefix; alias
            // commands require one unless the definition opted out.
            require_prefix: require_prefix.unwrap_or(!is_pattern),
            min_level,
            description,
            handler,
        });

        match pattern {
            Some(pattern) => {
                debug!(id = %id, pattern = pattern.as_str(), "registering pattern command");
                self.patterns.push((pattern, id));
            }
            None => {
                debug!(id = %id, aliases = ?aliases, "registering alias command");
                for alias in &aliases {
                    self.aliases.insert(alias.to_lowercase(), id);
                }
            }
        }
        self.commands.insert(id, registered);

        Ok(id)
    }

    /// Resolves a tokenized message to its candidate commands.
    ///
    /// The alias match (case-insensitive, if any) comes first, followed by
    /// every pattern that matches the raw message, in registration order.
    /// Fails with [`UnknownCommand`](DispatchError::UnknownCommand) when no
    /// candidate matched.
    pub fn resolve(
        &self,
        command_word: &str,
        raw_message: &str,
    ) -> DispatchResult<Vec<Arc<RegisteredCommand>>> {
        let mut candidates = Vec::new();

        if let Some(id) = self.aliases.get(&command_word.to_lowercase())
            && let Some(registered) = self.commands.get(id)
        {
            candidates.push(registered.clone());
        }

        for (pattern, id) in &self.patterns {
            if pattern.is_match(raw_message)
                && let Some(registered) = self.commands.get(id)
            {
                candidates.push(registered.clone());
            }
        }

        if candidates.is_empty() {
            return Err(DispatchError::UnknownCommand {
                word: command_word.to_string(),
            });
        }
        Ok(candidates)
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("aliases", &self.aliases.len())
            .field("patterns", &self.patterns.len())
            .field("commands", &self.commands.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(aliases: &[&str]) -> Command {
        Command::new(aliases.to_vec()).handler(|_ctx| async { Ok(()) })
    }

    #[test]
    fn test_alias_lookup_is_case_insensitive() {
        let mut registry = Registry::new();
        registry.register(noop(&["Ping"])).unwrap();

        let candidates = registry.resolve("PING", "!PING").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "Ping");
    }

    #[test]
    fn test_disjoint_alias_sets_never_cross_resolve() {
        let mut registry = Registry::new();
        registry.register(noop(&["ping", "p"])).unwrap();
        registry.register(noop(&["roll", "r"])).unwrap();

        let candidates = registry.resolve("p", "!p").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name(), "ping");
    }

    #[test]
    fn test_last_registration_wins_for_shared_alias() {
        let mut registry = Registry::new();
        let first = registry.register(noop(&["ping"])).unwrap();
        let second = registry.register(noop(&["ping", "pong"])).unwrap();

        let candidates = registry.resolve("ping", "!ping").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id(), second);
        assert_ne!(candidates[0].id(), first);
    }

    #[test]
    fn test_unknown_command_errors() {
        let mut registry = Registry::new();
        registry.register(noop(&["ping"])).unwrap();

        assert!(matches!(
            registry.resolve("pong", "!pong"),
            Err(DispatchError::UnknownCommand { word }) if word == "pong"
        ));
    }

    #[test]
    fn test_patterns_match_in_registration_order() {
        let mut registry = Registry::new();
        let a = registry
            .register(Command::pattern(Regex::new("hello").unwrap()).handler(|_| async { Ok(()) }))
            .unwrap();
        let b = registry
            .register(Command::pattern(Regex::new("h.llo").unwrap()).handler(|_| async { Ok(()) }))
            .unwrap();

        let candidates = registry.resolve("hello", "hello there").unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id(), a);
        assert_eq!(candidates[1].id(), b);
    }

    #[test]
    fn test_alias_candidate_precedes_pattern_candidates() {
        let mut registry = Registry::new();
        let pat = registry
            .register(Command::pattern(Regex::new("^!greet").unwrap()).handler(|_| async { Ok(()) }))
            .unwrap();
        let alias = registry.register(noop(&["greet"])).unwrap();

        let candidates = registry.resolve("greet", "!greet everyone").unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id(), alias);
        assert_eq!(candidates[1].id(), pat);
    }

    #[test]
    fn test_pattern_takes_precedence_over_aliases_on_one_definition() {
        let mut registry = Registry::new();
        registry
            .register(
                Command::new(["greet"])
                    .match_pattern(Regex::new("^hey").unwrap())
                    .handler(|_| async { Ok(()) }),
            )
            .unwrap();

        // The alias was never bound...
        assert!(registry.resolve("greet", "!greet").is_err());
        // ...but the pattern matches.
        let candidates = registry.resolve("hey", "hey there").unwrap();
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].is_pattern());
    }

    #[test]
    fn test_register_rejects_empty_definitions() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.register(Command::new(Vec::<String>::new()).handler(|_| async { Ok(()) })),
            Err(RegistryError::NoAliases)
        ));
        assert!(matches!(
            registry.register(Command::new(["ping"])),
            Err(RegistryError::MissingHandler)
        ));
    }

    #[test]
    fn test_register_compiles_template_eagerly() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.register(noop(&["ban"]).template("{{user")),
            Err(RegistryError::Template(_))
        ));
    }

    #[test]
    fn test_prefix_requirement_defaults() {
        let mut registry = Registry::new();
        registry.register(noop(&["ping"])).unwrap();
        registry
            .register(Command::pattern(Regex::new("lurk").unwrap()).handler(|_| async { Ok(()) }))
            .unwrap();

        let alias = registry.resolve("ping", "!ping").unwrap();
        assert!(alias[0].requires_prefix());
        let pattern = registry.resolve("lurk", "lurk").unwrap();
        assert!(!pattern[0].requires_prefix());
    }
}

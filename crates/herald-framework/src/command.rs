//! Command definitions.
//!
//! A [`Command`] describes one invokable action before it is registered:
//! its aliases (or matching pattern), its handler, and the optional parameter
//! template, prefix requirement, minimum level, and description block.
//!
//! Definitions are built fluently and consumed by
//! [`Registry::register`](crate::registry::Registry::register) (usually via
//! [`Engine::command`](crate::dispatcher::Engine::command)):
//!
//! ```rust,ignore
//! use herald_framework::{Command, Level};
//!
//! let ban = Command::new(["ban", "b"])
//!     .template("{{user}} {{reason}}")
//!     .min_level(Level::Moderator)
//!     .describe("Ban a user from the guild")
//!     .usage("ban <user> <reason>")
//!     .handler(|ctx| async move {
//!         ctx.reply(&format!("banned {}", ctx.param("user").unwrap_or("?")))
//!             .await?;
//!         Ok(())
//!     });
//! ```

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use herald_core::Level;
use regex::Regex;

use crate::context::CommandContext;
use crate::error::BoxError;

/// A type-erased command handler.
pub type BoxedHandler =
    Arc<dyn Fn(Arc<CommandContext>) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// Human-readable description block for a command.
#[derive(Debug, Clone, Default)]
pub struct Description {
    /// One-line summary.
    pub summary: String,
    /// Usage string shown when the arguments do not fit the template.
    pub usage: Option<String>,
}

/// An unregistered command definition.
///
/// A definition is either alias-based or pattern-based, never both: if a
/// pattern is present it takes precedence and alias registration is skipped.
/// Alias commands require an explicit prefix by default, pattern commands do
/// not; both defaults can be overridden with [`require_prefix`](Self::require_prefix).
pub struct Command {
    pub(crate) aliases: Vec<String>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) template: Option<String>,
    pub(crate) require_prefix: Option<bool>,
    pub(crate) min_level: Option<Level>,
    pub(crate) description: Option<Description>,
    pub(crate) handler: Option<BoxedHandler>,
}

impl Command {
    /// Creates an alias-based definition.
    pub fn new<I>(aliases: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            pattern: None,
            template: None,
            require_prefix: None,
            min_level: None,
            description: None,
            handler: None,
        }
    }

    /// Creates a pattern-based definition.
    ///
    /// The pattern is tested against the full raw message on every resolve,
    /// independent of prefix and alias matching.
    pub fn pattern(pattern: Regex) -> Self {
        let mut cmd = Self::new(Vec::<String>::new());
        cmd.pattern = Some(pattern);
        cmd
    }

    /// Sets a matching pattern on an existing definition.
    ///
    /// Once set, the aliases are ignored at registration time.
    pub fn match_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Sets the parameter template, e.g. `"{{user}} {{reason}}"`.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Overrides whether an explicit prefix is required.
    pub fn require_prefix(mut self, required: bool) -> Self {
        self.require_prefix = Some(required);
        self
    }

    /// Sets the minimum authorization level.
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = Some(level);
        self
    }

    /// Sets the one-line summary.
    pub fn describe(mut self, summary: impl Into<String>) -> Self {
        self.description
            .get_or_insert_with(Description::default)
            .summary = summary.into();
        self
    }

    /// Sets the usage string.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.description
            .get_or_insert_with(Description::default)
            .usage = Some(usage.into());
        self
    }

    /// Sets the handler.
    ///
    /// A handler is required; registering a definition without one fails.
    pub fn handler<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Arc<CommandContext>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        self.handler = Some(Arc::new(move |ctx| f(ctx).boxed()));
        self
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("aliases", &self.aliases)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("template", &self.template)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

//! The dispatch engine.
//!
//! [`Engine`] orchestrates one dispatch per inbound message:
//!
//! 1. Sender-eligibility gate (by [`BotType`])
//! 2. Tokenize (prefix, command word, arguments)
//! 3. Resolve candidates (alias match first, then patterns in registration
//!    order)
//! 4. Per candidate: check prefix requirement → extract parameters → run
//!    middleware → authorize → invoke → maybe schedule message deletion
//!
//! Expected conditions ([`DispatchError`](crate::error::DispatchError)) end
//! processing for one candidate without aborting the others and never
//! propagate to the embedding application. Handler invocation is
//! fire-and-continue: the candidate loop moves on as soon as middleware and
//! authorization have resolved, without waiting for the handler body.
//!
//! ```rust,ignore
//! use herald_framework::{Command, Engine};
//!
//! let mut engine = Engine::builder().prefix("!").build();
//! engine.command(Command::new(["ping"]).handler(|ctx| async move {
//!     ctx.reply("pong").await?;
//!     Ok(())
//! }))?;
//!
//! // per inbound message:
//! engine.dispatch(message, client).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{Level as LogLevel, debug, error, span, trace};

use herald_core::{BoxedClient, InboundMessage, RoleStore};

use crate::authorize::Authorizer;
use crate::command::Command;
use crate::context::CommandContext;
use crate::error::{DispatchError, EngineError, RegistryError};
use crate::middleware::{Middleware, MiddlewareContext, Pipeline};
use crate::prefix::Prefix;
use crate::registry::{CommandId, RegisteredCommand, Registry};
use crate::template::Params;
use crate::tokenizer::{Tokenized, tokenize};

/// Sender-eligibility mode, checked before any tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotType {
    /// Only messages from *other* identities are considered; the bot's own
    /// messages are ignored.
    #[default]
    Normal,
    /// Only messages from the bot's own identity are considered.
    #[serde(rename = "self")]
    SelfBot,
    /// Only messages originating inside a guild context are considered.
    #[serde(rename = "guildonly")]
    GuildOnly,
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    prefix: String,
    bot_type: BotType,
    superuser: Option<String>,
    delete_command_message: bool,
    delete_message_delay: Duration,
    store: Option<Arc<dyn RoleStore>>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
            bot_type: BotType::Normal,
            superuser: None,
            delete_command_message: false,
            delete_message_delay: Duration::ZERO,
            store: None,
        }
    }
}

impl EngineBuilder {
    /// Sets the literal command prefix (default `"!"`).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the sender-eligibility mode.
    pub fn bot_type(mut self, bot_type: BotType) -> Self {
        self.bot_type = bot_type;
        self
    }

    /// Sets the single trusted superuser identity.
    pub fn superuser(mut self, identity: impl Into<String>) -> Self {
        self.superuser = Some(identity.into());
        self
    }

    /// Enables scheduling deletion of triggering messages after dispatch.
    pub fn delete_command_message(mut self, enabled: bool) -> Self {
        self.delete_command_message = enabled;
        self
    }

    /// Sets the delay before scheduled deletions fire.
    pub fn delete_message_delay(mut self, delay: Duration) -> Self {
        self.delete_message_delay = delay;
        self
    }

    /// Injects the external role store used by the authorization check.
    pub fn role_store(mut self, store: Arc<dyn RoleStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the engine.
    pub fn build(self) -> Engine {
        Engine {
            prefix: Prefix::new(&self.prefix),
            bot_type: self.bot_type,
            registry: Registry::new(),
            pipeline: Pipeline::new(),
            authorizer: Authorizer::new(self.superuser, self.store),
            delete_command_message: self.delete_command_message,
            delete_message_delay: self.delete_message_delay,
        }
    }
}

/// The command dispatch engine.
///
/// Registration (commands, middleware) happens during a setup phase before
/// the first message arrives; dispatch then only reads the shared immutable
/// state and mutates per-dispatch-local data, so no cross-dispatch lock is
/// held anywhere.
pub struct Engine {
    prefix: Prefix,
    bot_type: BotType,
    registry: Registry,
    pipeline: Pipeline,
    authorizer: Authorizer,
    delete_command_message: bool,
    delete_message_delay: Duration,
}

impl Engine {
    /// Returns a builder with defaults.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Returns the configured prefix.
    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Appends a middleware to the pipeline.
    pub fn middleware(&mut self, middleware: Arc<dyn Middleware>) -> &mut Self {
        self.pipeline.push(middleware);
        self
    }

    /// Registers a command definition.
    pub fn command(&mut self, command: Command) -> Result<CommandId, RegistryError> {
        self.registry.register(command)
    }

    /// Feeds one inbound message through the dispatcher.
    ///
    /// Expected conditions are swallowed per candidate; only genuine failures
    /// (a middleware erroring) propagate.
    pub async fn dispatch(
        &self,
        message: InboundMessage,
        client: BoxedClient,
    ) -> Result<(), EngineError> {
        let span = span!(LogLevel::DEBUG, "dispatch", message_id = %message.id);
        let _enter = span.enter();

        if !self.is_eligible(&message, &client) {
            trace!(sender = %message.sender, "sender not eligible, ignoring");
            return Ok(());
        }

        let tokens = match tokenize(&self.prefix, &message.content) {
            Ok(tokens) => tokens,
            Err(_) => {
                trace!("message could not be tokenized, ignoring");
                return Ok(());
            }
        };

        let candidates = match self.registry.resolve(&tokens.command, &message.content) {
            Ok(candidates) => candidates,
            Err(DispatchError::UnknownCommand { word }) => {
                self.notify_unknown(&message, &client, &tokens, &word).await;
                return Ok(());
            }
            Err(_) => return Ok(()),
        };

        debug!(
            command = %tokens.command,
            candidates = candidates.len(),
            "resolved candidates"
        );

        let message = Arc::new(message);
        for candidate in candidates {
            self.run_candidate(&message, &client, &tokens, candidate)
                .await?;
        }

        Ok(())
    }

    /// Runs one candidate through its gated steps.
    async fn run_candidate(
        &self,
        message: &Arc<InboundMessage>,
        client: &BoxedClient,
        tokens: &Tokenized,
        candidate: Arc<RegisteredCommand>,
    ) -> Result<(), EngineError> {
        if candidate.requires_prefix() && tokens.prefix.is_none() {
            trace!(command = candidate.name(), "prefix required but absent");
            return Ok(());
        }

        let params = match candidate.template() {
            Some(template) => match template.extract(&tokens.args) {
                Ok(captures) => Params {
                    args: tokens.args.clone(),
                    captures: Some(captures),
                },
                Err(_) => {
                    debug!(command = candidate.name(), "parameter mismatch");
                    self.notify_mismatch(message, client, &candidate).await;
                    return Ok(());
                }
            },
            None => Params::raw(tokens.args.clone()),
        };

        let mw_ctx = MiddlewareContext {
            message: Arc::clone(message),
            command: Arc::clone(&candidate),
            client: Arc::clone(client),
        };
        match self.pipeline.run(&mw_ctx).await {
            Ok(true) => {}
            Ok(false) => {
                // Middleware is responsible for its own messaging.
                debug!(command = candidate.name(), "rejected by middleware");
                return Ok(());
            }
            Err(err) => return Err(EngineError::Middleware(err)),
        }

        if let Some(required) = candidate.min_level()
            && self
                .authorizer
                .authorize(message, client, required)
                .await
                .is_err()
        {
            debug!(command = candidate.name(), required = %required, "unauthorized");
            self.notify_denied(message, client).await;
            return Ok(());
        }

        let ctx = Arc::new(CommandContext::new(
            Arc::clone(message),
            Arc::clone(client),
            params,
            candidate.name(),
        ));
        let name = candidate.name().to_string();
        let future = (candidate.handler())(ctx);
        tokio::spawn(async move {
            if let Err(err) = future.await {
                error!(command = %name, error = %err, "command handler failed");
            }
        });

        if self.delete_command_message {
            let _ = client
                .schedule_delete(&message.channel, &message.id, self.delete_message_delay)
                .await;
        }

        Ok(())
    }

    fn is_eligible(&self, message: &InboundMessage, client: &BoxedClient) -> bool {
        match self.bot_type {
            BotType::Normal => !message.from_self && message.sender != client.id(),
            BotType::SelfBot => message.from_self || message.sender == client.id(),
            BotType::GuildOnly => message.guild.is_some(),
        }
    }

    /// Best-effort "command not found" notice, suppressed when the message
    /// carried no prefix or is a doubled-prefix escape sequence.
    async fn notify_unknown(
        &self,
        message: &InboundMessage,
        client: &BoxedClient,
        tokens: &Tokenized,
        word: &str,
    ) {
        debug!(word, "no command matched");
        if tokens.prefix.is_none() || self.prefix.is_escape(&message.content) {
            return;
        }
        let _ = client
            .send(&message.channel, &format!("Command `{word}` not found."))
            .await;
    }

    /// Best-effort explanatory notice for a parameter mismatch.
    async fn notify_mismatch(
        &self,
        message: &InboundMessage,
        client: &BoxedClient,
        candidate: &RegisteredCommand,
    ) {
        let text = match candidate.description().and_then(|d| d.usage.as_deref()) {
            Some(usage) => format!("Usage: {usage}"),
            None => format!("Invalid arguments for `{}`.", candidate.name()),
        };
        let _ = client.send(&message.channel, &text).await;
    }

    /// Denial notice, optionally scheduled for deletion alongside command
    /// message cleanup.
    async fn notify_denied(&self, message: &InboundMessage, client: &BoxedClient) {
        let sent = client
            .send(&message.channel, "You are not allowed to use that command.")
            .await;
        if self.delete_command_message
            && let Ok(notice_id) = sent
        {
            let _ = client
                .schedule_delete(&message.channel, &notice_id, self.delete_message_delay)
                .await;
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("prefix", &self.prefix.literal())
            .field("bot_type", &self.bot_type)
            .field("commands", &self.registry.len())
            .field("middleware", &self.pipeline.len())
            .finish()
    }
}

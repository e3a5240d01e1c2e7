//! Per-invocation context handed to command handlers.

use std::sync::Arc;

use herald_core::{BoxedClient, ClientResult, InboundMessage};
use serde_json::Value;

use crate::template::Params;

/// Everything a handler gets for one invocation.
///
/// The context is created per candidate, handed to the handler, and dropped
/// when the handler returns; nothing in it is shared across dispatches except
/// the client handle itself.
pub struct CommandContext {
    message: Arc<InboundMessage>,
    client: BoxedClient,
    params: Params,
    name: String,
}

impl CommandContext {
    pub(crate) fn new(
        message: Arc<InboundMessage>,
        client: BoxedClient,
        params: Params,
        name: impl Into<String>,
    ) -> Self {
        Self {
            message,
            client,
            params,
            name: name.into(),
        }
    }

    /// The triggering message.
    pub fn message(&self) -> &InboundMessage {
        &self.message
    }

    /// The transport client handle.
    pub fn client(&self) -> &BoxedClient {
        &self.client
    }

    /// The name of the matched command (primary alias, or the pattern source
    /// for pattern commands).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full parameter result.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The ordered raw argument tokens.
    pub fn args(&self) -> &[String] {
        &self.params.args
    }

    /// Looks up a named template capture.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Sends reply text to the channel the message arrived on.
    pub async fn reply(&self, text: &str) -> ClientResult<String> {
        self.client.send(&self.message.channel, text).await
    }

    /// Sends embed-like structured content to the originating channel.
    pub async fn reply_embed(&self, embed: Value) -> ClientResult<String> {
        self.client.send_embed(&self.message.channel, embed).await
    }
}

impl std::fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("command", &self.name)
            .field("message", &self.message.id)
            .field("args", &self.params.args)
            .finish_non_exhaustive()
    }
}

//! Inbound message model.

use serde::Deserialize;

/// One inbound message as delivered by the transport.
///
/// This is plain data: the engine never mutates it, and no per-message state
/// survives the dispatch that consumed it. Transports that deliver JSON can
/// deserialize straight into this shape; others construct it field by field.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    /// Transport-assigned message identifier.
    pub id: String,
    /// Identity of the sender.
    pub sender: String,
    /// Display name of the sender, when the transport provides one.
    #[serde(default)]
    pub sender_name: Option<String>,
    /// Raw text content.
    pub content: String,
    /// Guild context, absent for direct messages.
    #[serde(default)]
    pub guild: Option<String>,
    /// Channel the message arrived on.
    pub channel: String,
    /// Whether the transport flagged this as the bot's own message.
    #[serde(default)]
    pub from_self: bool,
}

impl InboundMessage {
    /// Creates a message with the minimum required fields.
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        channel: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            sender_name: None,
            content: content.into(),
            guild: None,
            channel: channel.into(),
            from_self: false,
        }
    }

    /// Sets the guild context.
    pub fn in_guild(mut self, guild: impl Into<String>) -> Self {
        self.guild = Some(guild.into());
        self
    }

    /// Flags the message as sent by the bot itself.
    pub fn from_self(mut self, from_self: bool) -> Self {
        self.from_self = from_self;
        self
    }
}

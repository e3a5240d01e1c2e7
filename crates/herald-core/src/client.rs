//! Client trait and related types.
//!
//! This module defines the [`Client`] trait, the engine's handle to the
//! real-time messaging transport. Delivery, reconnection, and remote rate
//! limits are entirely the transport's business; the engine only issues calls
//! and observes their results.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;

/// The transport handle consumed by the dispatch engine.
///
/// A `Client` is an active connection to the chat service. The engine uses it
/// to send replies, schedule message cleanup, and read the guild metadata the
/// authorization check needs (ownership and role memberships).
///
/// Implementations must be cheap to share; the engine holds one
/// [`BoxedClient`] per dispatch and clones the `Arc` freely.
#[async_trait]
pub trait Client: Send + Sync + 'static {
    /// Returns the bot's own identity on this transport.
    fn id(&self) -> &str;

    /// Sends plain reply text to a channel.
    ///
    /// Returns the transport-assigned identifier of the sent message, so the
    /// caller can schedule its deletion.
    async fn send(&self, channel: &str, text: &str) -> ClientResult<String>;

    /// Sends embed-like structured content to a channel.
    async fn send_embed(&self, channel: &str, embed: Value) -> ClientResult<String>;

    /// Schedules deletion of a message after a delay.
    ///
    /// The call registers the deletion and returns; it does not wait for the
    /// delay to elapse.
    async fn schedule_delete(
        &self,
        channel: &str,
        message_id: &str,
        delay: Duration,
    ) -> ClientResult<()>;

    /// Returns the owner identity of a guild, if the transport knows it.
    async fn guild_owner(&self, guild: &str) -> ClientResult<Option<String>>;

    /// Returns the role memberships of a user within a guild.
    async fn member_roles(&self, guild: &str, user: &str) -> ClientResult<Vec<String>>;
}

/// A shared, type-erased client handle.
pub type BoxedClient = Arc<dyn Client>;

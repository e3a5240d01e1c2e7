//! Unified error types for the core boundary traits.
//!
//! Engine-level errors (the expected dispatch conditions) are defined in
//! herald-framework; this module only covers failures of the external
//! collaborators.

use thiserror::Error;

/// Errors that can occur when talking to the messaging transport.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The transport connection is not available.
    #[error("client is not connected")]
    NotConnected,

    /// A send operation failed.
    #[error("failed to send message: {0}")]
    SendFailed(String),

    /// A scheduled deletion could not be registered.
    #[error("failed to schedule deletion of message {message_id}: {reason}")]
    DeleteFailed {
        /// The message that should have been deleted.
        message_id: String,
        /// Reason for failure.
        reason: String,
    },

    /// Guild metadata could not be fetched.
    #[error("guild '{guild}' is unavailable: {reason}")]
    GuildUnavailable {
        /// The guild whose metadata was requested.
        guild: String,
        /// Reason for failure.
        reason: String,
    },

    /// The remote service rejected the call.
    #[error("API error ({code}): {message}")]
    Api { code: i64, message: String },

    /// Other transport-side error.
    #[error("{0}")]
    Other(String),
}

/// Errors that can occur when talking to the external role store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store is unreachable.
    #[error("role store unavailable: {0}")]
    Unavailable(String),

    /// A read query failed.
    #[error("role query failed: {0}")]
    Query(String),

    /// A write failed.
    #[error("role write failed: {0}")]
    Write(String),
}

/// Result type for transport operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type for role store operations.
pub type StoreResult<T> = Result<T, StoreError>;

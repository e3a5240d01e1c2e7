//! Role store trait.
//!
//! The engine persists no role data itself. Moderator and admin levels live in
//! some external durable store behind this trait; the store is handed to the
//! authorization check and the role command at construction time, never
//! reached through a process-wide singleton.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::level::Level;

/// One persisted (role, level) pair within a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    /// Transport role identifier.
    pub role_id: String,
    /// The level granted to members of that role.
    pub level: Level,
}

/// External persistence for per-guild role levels.
///
/// All operations are asynchronous and may fail; the authorization check
/// treats any failure as a denial rather than propagating it.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Fetches the persisted role records for a guild whose level is at most
    /// `max_level`.
    async fn find_roles(&self, guild: &str, max_level: Level) -> StoreResult<Vec<RoleRecord>>;

    /// Ensures a guild record exists, creating it on first touch.
    async fn find_or_create_guild(&self, guild: &str) -> StoreResult<()>;

    /// Persists one (role, level) pair for a guild, overwriting any previous
    /// level for that role.
    async fn persist_role(&self, role_id: &str, guild: &str, level: Level) -> StoreResult<()>;
}

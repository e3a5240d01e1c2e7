//! Authorization check.
//!
//! Authorization is a monotonic numeric comparison: a sender's level
//! satisfies a requirement exactly when it is greater than or equal to it.
//! The check is two-tiered:
//!
//! 1. **Fast path** — the sender's level is derived without leaving the
//!    process (superuser identity from configuration) or with transport
//!    metadata only (guild owner). If that level already satisfies the
//!    requirement the external role store is never consulted; owners and the
//!    superuser never pay the lookup cost.
//! 2. **Slow path** — the persisted role records for the guild with level at
//!    most the requirement are intersected with the sender's role
//!    memberships; a non-empty intersection authorizes.
//!
//! Store and membership lookup failures are treated as a denial, never
//! propagated: an unreachable store must not grant privileges.

use std::sync::Arc;

use tracing::{debug, warn};

use herald_core::{BoxedClient, InboundMessage, Level, RoleStore};

use crate::error::{DispatchError, DispatchResult};

/// Performs the role-hierarchy authorization check.
///
/// The role store is injected at construction; the authorizer never reaches
/// for ambient state.
pub struct Authorizer {
    superuser: Option<String>,
    store: Option<Arc<dyn RoleStore>>,
}

impl Authorizer {
    /// Creates an authorizer with the configured superuser identity and an
    /// optional role store.
    ///
    /// Without a store the slow path always denies.
    pub fn new(superuser: Option<String>, store: Option<Arc<dyn RoleStore>>) -> Self {
        Self { superuser, store }
    }

    /// Checks that the message sender satisfies `required`.
    ///
    /// Fails with [`Unauthorized`](DispatchError::Unauthorized); the caller
    /// decides how to surface the denial.
    pub async fn authorize(
        &self,
        message: &InboundMessage,
        client: &BoxedClient,
        required: Level,
    ) -> DispatchResult<()> {
        let fast = self.fast_level(message, client).await;
        if fast.satisfies(required) {
            debug!(
                sender = %message.sender,
                level = %fast,
                required = %required,
                "authorized via fast path"
            );
            return Ok(());
        }

        if self.lookup(message, client, required).await {
            return Ok(());
        }

        Err(DispatchError::Unauthorized { required })
    }

    /// Derives the sender's level without consulting the role store.
    async fn fast_level(&self, message: &InboundMessage, client: &BoxedClient) -> Level {
        if self
            .superuser
            .as_deref()
            .is_some_and(|su| su == message.sender)
        {
            return Level::Superuser;
        }

        if let Some(guild) = &message.guild {
            match client.guild_owner(guild).await {
                Ok(Some(owner)) if owner == message.sender => return Level::Owner,
                Ok(_) => {}
                Err(err) => {
                    // Inconclusive, fall through to the lookup path.
                    warn!(guild = %guild, error = %err, "owner lookup failed");
                }
            }
        }

        Level::None
    }

    /// The slow path: persisted guild roles intersected with the sender's
    /// memberships. Any failure is a denial.
    async fn lookup(&self, message: &InboundMessage, client: &BoxedClient, required: Level) -> bool {
        let Some(guild) = &message.guild else {
            return false;
        };
        let Some(store) = &self.store else {
            warn!(guild = %guild, "authorization requested but no role store configured");
            return false;
        };

        let records = match store.find_roles(guild, required).await {
            Ok(records) => records,
            Err(err) => {
                warn!(guild = %guild, error = %err, "role store lookup failed, denying");
                return false;
            }
        };
        if records.is_empty() {
            return false;
        }

        let memberships = match client.member_roles(guild, &message.sender).await {
            Ok(roles) => roles,
            Err(err) => {
                warn!(guild = %guild, error = %err, "membership lookup failed, denying");
                return false;
            }
        };

        let granted = records
            .iter()
            .any(|record| memberships.iter().any(|role| *role == record.role_id));
        if granted {
            debug!(
                sender = %message.sender,
                guild = %guild,
                required = %required,
                "authorized via role store"
            );
        }
        granted
    }
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("superuser", &self.superuser)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

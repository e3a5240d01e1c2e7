//! Built-in commands.

use std::sync::Arc;

use tracing::info;

use herald_core::{Level, RoleStore};

use crate::command::Command;

/// Builds the privileged role-assignment command.
///
/// `setlevel <role> <level>` persists a (role, level) pair for the invoking
/// guild. It requires at least [`Level::Owner`] and only accepts level names
/// from the assignable subset — moderator and admin; owner and superuser are
/// derived levels and can never be persisted through this path.
///
/// The store is captured at construction, mirroring the constructor injection
/// used by the authorization check.
pub fn set_level_command(store: Arc<dyn RoleStore>) -> Command {
    Command::new(["setlevel"])
        .template("{{role}} {{level}}")
        .min_level(Level::Owner)
        .describe("Assign a permission level to a guild role")
        .usage("setlevel <role> <moderator|admin>")
        .handler(move |ctx| {
            let store = Arc::clone(&store);
            async move {
                let Some(role) = ctx.param("role").map(str::to_owned) else {
                    return Ok(());
                };
                let Some(name) = ctx.param("level").map(str::to_owned) else {
                    return Ok(());
                };

                let Some(level) = Level::from_assignable_name(&name) else {
                    let _ = ctx
                        .reply(&format!(
                            "'{name}' is not an assignable level. Use moderator or admin."
                        ))
                        .await;
                    return Ok(());
                };

                let Some(guild) = ctx.message().guild.clone() else {
                    let _ = ctx.reply("This command only works inside a guild.").await;
                    return Ok(());
                };

                if let Err(err) = store.find_or_create_guild(&guild).await {
                    let _ = ctx.reply("Could not reach the role store.").await;
                    return Err(err.into());
                }
                if let Err(err) = store.persist_role(&role, &guild, level).await {
                    let _ = ctx.reply("Could not persist the role level.").await;
                    return Err(err.into());
                }

                info!(guild = %guild, role = %role, level = %level, "role level assigned");
                let _ = ctx.reply(&format!("Role {role} now grants {level}.")).await;
                Ok(())
            }
        })
}

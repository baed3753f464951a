//! Permission gate backed by the actor's guild permissions

use async_trait::async_trait;
use tracing::debug;

use crate::application::errors::BotError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::reply::COLOR_ERROR;
use crate::domain::entities::{Command, Embed, Reply};
use crate::domain::traits::PermissionGate;

/// Allows a command when the actor holds every permission it declares.
///
/// `administrator` satisfies any requirement. Commands that declare nothing
/// are open to everyone.
#[derive(Debug, Default, Clone)]
pub struct RolePermissionGate;

impl RolePermissionGate {
    pub fn new() -> Self {
        Self
    }

    fn allowed(ctx: &CommandContext, command: &Command) -> bool {
        if command.permissions.is_empty() {
            return true;
        }

        match ctx.invocation.actor_member() {
            Some(member) => command
                .permissions
                .iter()
                .all(|p| member.has_permission(*p)),
            None => false,
        }
    }
}

#[async_trait]
impl PermissionGate for RolePermissionGate {
    async fn check(&self, ctx: &CommandContext, command: &Command) -> Result<bool, BotError> {
        if Self::allowed(ctx, command) {
            return Ok(true);
        }

        debug!(
            actor = %ctx.invocation.actor().id,
            command = %command.name,
            required = ?command.permissions,
            "actor lacks required permissions"
        );

        ctx.reply(Reply::embed(Embed::new(
            "Access Denied",
            "You do not have permission to use this command.",
            COLOR_ERROR,
        )))
        .await?;

        Ok(false)
    }
}

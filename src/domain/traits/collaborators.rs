use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::application::messaging::{CommandContext, InvocationContext};
use crate::domain::entities::{Command, User};

/// Decides whether an actor may run a command
#[async_trait]
pub trait PermissionGate: Send + Sync {
    /// `Ok(false)` denies silently; the gate sends any denial notice itself
    async fn check(&self, ctx: &CommandContext, command: &Command) -> Result<bool, BotError>;
}

/// Receives coarse moderation audit records
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(
        &self,
        ctx: &InvocationContext,
        command: &str,
        target: Option<&User>,
        reason: &str,
    ) -> Result<(), BotError>;
}

/// Terminal handler for faults raised while running a command
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn handle(&self, error: &BotError, ctx: &CommandContext);
}

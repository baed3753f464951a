use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::{CommandRegistry, PlatformEvent};
use crate::domain::traits::Platform;

/// Behaviour bound to a command manifest
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn execute(
        &self,
        ctx: &CommandContext,
        args: &[String],
        registry: &CommandRegistry,
    ) -> Result<(), BotError>;
}

/// Behaviour bound to a platform signal
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, platform: &Arc<dyn Platform>, event: &PlatformEvent) -> Result<(), BotError>;
}

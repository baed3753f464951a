use async_trait::async_trait;
use tracing::debug;

use crate::application::errors::BotError;
use crate::application::messaging::CommandContext;
use crate::application::moderation::BanReport;
use crate::domain::entities::CommandRegistry;
use crate::domain::traits::CommandHandler;

/// `ban <user> [reason]`
pub struct BanCommand;

#[async_trait]
impl CommandHandler for BanCommand {
    async fn execute(
        &self,
        ctx: &CommandContext,
        args: &[String],
        _registry: &CommandRegistry,
    ) -> Result<(), BotError> {
        let report = BanReport::run(ctx, args).await;
        debug!(?report, "ban finished");
        ctx.reply(report.to_reply()).await
    }
}

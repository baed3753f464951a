use async_trait::async_trait;
use chrono::Utc;

use crate::application::errors::BotError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::{CommandRegistry, Reply};
use crate::domain::traits::CommandHandler;

pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    async fn execute(
        &self,
        ctx: &CommandContext,
        _args: &[String],
        _registry: &CommandRegistry,
    ) -> Result<(), BotError> {
        let latency = Utc::now() - ctx.message().timestamp;
        ctx.reply(Reply::text(format!(
            "Pong! 🏓 ({} ms)",
            latency.num_milliseconds().max(0)
        )))
        .await
    }
}

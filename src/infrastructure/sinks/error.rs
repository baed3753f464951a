use async_trait::async_trait;
use tracing::{error, warn};

use crate::application::errors::BotError;
use crate::application::messaging::CommandContext;
use crate::domain::entities::Reply;
use crate::domain::traits::ErrorSink;

const GENERIC_NOTICE: &str = "There was an error while executing this command.";

/// Logs the fault for operators and tells the invoker something went wrong
#[derive(Debug, Default)]
pub struct ReplyingErrorSink;

#[async_trait]
impl ErrorSink for ReplyingErrorSink {
    async fn handle(&self, err: &BotError, ctx: &CommandContext) {
        error!(
            guild = %ctx.invocation.guild().id,
            actor = %ctx.invocation.actor().id,
            command = %ctx.invocation.command,
            error = ?err,
            "command failed"
        );

        if let Err(e) = ctx.reply(Reply::error(GENERIC_NOTICE)).await {
            warn!(error = %e, "failed to send error notice");
        }
    }
}

//! Per-message invocation state

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::{Guild, Member, Message, Reply, User};
use crate::domain::traits::Platform;

/// Everything known about one prefixed message, created per dispatch
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub message: Message,
    pub prefix: String,
    /// Lower-cased command name
    pub command: String,
    pub args: Vec<String>,
}

impl InvocationContext {
    pub fn actor(&self) -> &User {
        &self.message.author
    }

    pub fn actor_member(&self) -> Option<&Member> {
        self.message.member.as_ref()
    }

    pub fn guild(&self) -> &Guild {
        &self.message.guild
    }

    pub fn raw_text(&self) -> &str {
        &self.message.content
    }
}

/// Invocation plus the platform handle commands use to act
#[derive(Clone)]
pub struct CommandContext {
    pub invocation: InvocationContext,
    pub platform: Arc<dyn Platform>,
}

impl CommandContext {
    pub fn new(invocation: InvocationContext, platform: Arc<dyn Platform>) -> Self {
        Self {
            invocation,
            platform,
        }
    }

    pub fn message(&self) -> &Message {
        &self.invocation.message
    }

    /// Reply in the channel the command came from
    pub async fn reply(&self, reply: Reply) -> Result<(), BotError> {
        self.platform
            .reply(&self.invocation.message.channel_id, reply)
            .await?;
        Ok(())
    }
}

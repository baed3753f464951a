//! Message dispatcher - Routes prefixed messages to command handlers
//!
//! One `dispatch` call per inbound message:
//!
//! 1. ignore the bot's own messages
//! 2. resolve the guild prefix and match it case-insensitively
//! 3. tokenize into a command name and arguments
//! 4. look the command up in the registry
//! 5. ask the permission gate
//! 6. run the handler with a read-only view of the registry
//! 7. emit an audit record for moderation commands
//!
//! Everything from step 4 on runs inside a single containment boundary:
//! errors and panics are handed to the error sink and never escape.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, info_span, warn, Instrument};

use super::context::{CommandContext, InvocationContext};
use super::parser;
use super::prefix::PrefixResolver;
use crate::application::errors::{BotError, CommandError};
use crate::domain::entities::{Command, CommandRegistry, Message};
use crate::domain::traits::{AuditSink, ErrorSink, PermissionGate, Platform};

/// Why a message was discarded without running anything
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    OwnMessage,
    NoPrefix,
    EmptyCommand,
    UnknownCommand(String),
}

/// Terminal state of one dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    Denied { command: String },
    Completed { command: String, audited: bool },
    Failed { command: String },
}

/// Message dispatcher - shared across concurrently running dispatch tasks
pub struct MessageDispatcher {
    registry: Arc<CommandRegistry>,
    platform: Arc<dyn Platform>,
    prefixes: PrefixResolver,
    gate: Arc<dyn PermissionGate>,
    audit: Arc<dyn AuditSink>,
    errors: Arc<dyn ErrorSink>,
}

impl MessageDispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        platform: Arc<dyn Platform>,
        prefixes: PrefixResolver,
        gate: Arc<dyn PermissionGate>,
        audit: Arc<dyn AuditSink>,
        errors: Arc<dyn ErrorSink>,
    ) -> Self {
        Self {
            registry,
            platform,
            prefixes,
            gate,
            audit,
            errors,
        }
    }

    /// Process one inbound message
    pub async fn dispatch(&self, message: Message) -> DispatchOutcome {
        if message.author.id == self.platform.bot_user().id {
            return DispatchOutcome::Ignored(IgnoreReason::OwnMessage);
        }

        let prefix = self.prefixes.resolve(&message.guild.id).await;
        let Some(rest) = parser::strip_prefix(&message.content, &prefix) else {
            return DispatchOutcome::Ignored(IgnoreReason::NoPrefix);
        };
        let Some(parsed) = parser::tokenize(rest) else {
            return DispatchOutcome::Ignored(IgnoreReason::EmptyCommand);
        };

        let span = info_span!(
            "dispatch",
            guild = %message.guild.id,
            actor = %message.author.id,
            command = %parsed.name,
        );

        let ctx = CommandContext::new(
            InvocationContext {
                message,
                prefix,
                command: parsed.name,
                args: parsed.args,
            },
            Arc::clone(&self.platform),
        );

        let result = AssertUnwindSafe(self.run(&ctx))
            .catch_unwind()
            .instrument(span)
            .await;

        let command = ctx.invocation.command.clone();
        let error = match result {
            Ok(Ok(outcome)) => return outcome,
            Ok(Err(e)) => e,
            Err(payload) => {
                let detail = panic_message(payload.as_ref());
                warn!(command = %command, panic = %detail, "command handler panicked");
                BotError::Command(CommandError::Panicked(command.clone()))
            }
        };

        self.errors.handle(&error, &ctx).await;
        DispatchOutcome::Failed { command }
    }

    async fn run(&self, ctx: &CommandContext) -> Result<DispatchOutcome, BotError> {
        let name = &ctx.invocation.command;

        let Some(command) = self.registry.get(name) else {
            debug!(command = %name, "unknown command");
            return Ok(DispatchOutcome::Ignored(IgnoreReason::UnknownCommand(name.clone())));
        };

        if !self.gate.check(ctx, command).await? {
            debug!(command = %name, "permission gate denied");
            return Ok(DispatchOutcome::Denied {
                command: command.name.clone(),
            });
        }

        command
            .handler
            .execute(ctx, &ctx.invocation.args, &self.registry)
            .await?;

        let audited = command.is_moderation();
        if audited {
            self.record_audit(&ctx.invocation, command).await;
        }

        Ok(DispatchOutcome::Completed {
            command: command.name.clone(),
            audited,
        })
    }

    /// Coarse record built from the raw message, not from what the handler resolved
    async fn record_audit(&self, invocation: &InvocationContext, command: &Command) {
        let target = invocation.message.mentions.first();
        let reason = invocation.args.get(1..).unwrap_or_default().join(" ");

        if let Err(e) = self
            .audit
            .record(invocation, &command.name, target, &reason)
            .await
        {
            warn!(command = %command.name, error = %e, "audit sink failed");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

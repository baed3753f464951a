//! Moderation audit trail

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

use crate::application::errors::{BotError, StorageError};
use crate::application::messaging::InvocationContext;
use crate::domain::entities::User;
use crate::domain::traits::AuditSink;

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub guild_id: String,
    pub guild_name: String,
    pub channel_id: String,
    pub message_id: String,
    pub actor_id: String,
    pub actor_tag: String,
    pub command: String,
    pub target_id: Option<String>,
    pub target_tag: Option<String>,
    pub reason: String,
}

impl AuditRecord {
    pub fn new(ctx: &InvocationContext, command: &str, target: Option<&User>, reason: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            guild_id: ctx.guild().id.clone(),
            guild_name: ctx.guild().name.clone(),
            channel_id: ctx.message.channel_id.clone(),
            message_id: ctx.message.id.clone(),
            actor_id: ctx.actor().id.clone(),
            actor_tag: ctx.actor().tag(),
            command: command.to_string(),
            target_id: target.map(|u| u.id.clone()),
            target_tag: target.map(User::tag),
            reason: reason.to_string(),
        }
    }
}

/// Appends one JSON object per line to a file
pub struct JsonlAuditSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn append(&self, record: &AuditRecord) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    async fn record(
        &self,
        ctx: &InvocationContext,
        command: &str,
        target: Option<&User>,
        reason: &str,
    ) -> Result<(), BotError> {
        let record = AuditRecord::new(ctx, command, target, reason);
        self.append(&record).await?;
        Ok(())
    }
}

/// Writes audit records to the log only
#[derive(Debug, Default)]
pub struct LogAuditSink;

#[async_trait]
impl AuditSink for LogAuditSink {
    async fn record(
        &self,
        ctx: &InvocationContext,
        command: &str,
        target: Option<&User>,
        reason: &str,
    ) -> Result<(), BotError> {
        info!(
            guild = %ctx.guild().id,
            actor = %ctx.actor().id,
            command,
            target = target.map(|u| u.id.as_str()).unwrap_or("-"),
            reason,
            "moderation action"
        );
        Ok(())
    }
}

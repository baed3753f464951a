use async_trait::async_trait;
use crate::application::errors::StorageError;

/// Per-guild command prefix storage
#[async_trait]
pub trait PrefixStore: Send + Sync {
    /// Stored prefix for a guild, `None` when the guild never set one
    async fn prefix(&self, guild_id: &str) -> Result<Option<String>, StorageError>;

    async fn set_prefix(&self, guild_id: &str, prefix: &str) -> Result<(), StorageError>;
}

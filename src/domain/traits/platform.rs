use async_trait::async_trait;

use crate::application::errors::PlatformError;
use crate::domain::entities::{Member, Reply, User};

/// Capabilities consumed from the chat platform client
#[async_trait]
pub trait Platform: Send + Sync {
    /// The identity the bot is logged in as
    fn bot_user(&self) -> User;

    /// Post a reply in a guild channel
    async fn reply(&self, channel_id: &str, reply: Reply) -> Result<(), PlatformError>;

    /// Send a private message to a user
    async fn send_direct(&self, user_id: &str, reply: Reply) -> Result<(), PlatformError>;

    /// Fetch a live guild membership
    async fn fetch_member(&self, guild_id: &str, user_id: &str) -> Result<Member, PlatformError>;

    /// Fetch a platform-wide user identity
    async fn fetch_user(&self, user_id: &str) -> Result<User, PlatformError>;

    /// Ban a current member, removing them from the guild
    async fn ban_member(&self, guild_id: &str, member: &User, reason: &str) -> Result<(), PlatformError>;

    /// Record a guild ban for an identity that need not be a member
    async fn ban_user(&self, guild_id: &str, user_id: &str, reason: &str) -> Result<(), PlatformError>;

    /// Update the bot's custom status line
    async fn set_activity(&self, status: &str) -> Result<(), PlatformError>;
}

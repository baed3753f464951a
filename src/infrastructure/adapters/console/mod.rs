//! Console adapter for development/testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::application::errors::PlatformError;
use crate::domain::entities::message::mention_ids;
use crate::domain::entities::{Guild, Member, Message, Reply, User};
use crate::domain::traits::Platform;
use crate::infrastructure::config::{ConsoleConfig, ConsoleUser};

/// A ban recorded by the console adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BanRecord {
    pub guild_id: String,
    pub user_id: String,
    pub reason: String,
}

/// Console bot adapter for local development.
///
/// Holds a single in-memory guild; replies and direct messages go to stdout.
pub struct ConsoleAdapter {
    bot: User,
    guild: Guild,
    channel_id: String,
    actor: Member,
    members: RwLock<HashMap<String, Member>>,
    users: HashMap<String, User>,
    bans: RwLock<Vec<BanRecord>>,
}

fn to_user(u: &ConsoleUser) -> User {
    let user = User::new(&u.id, &u.username);
    if u.bot {
        user.bot()
    } else {
        user
    }
}

fn to_member(u: &ConsoleUser) -> Member {
    Member::new(to_user(u))
        .with_permissions(u.permissions.clone())
        .with_moderatable(u.moderatable)
}

impl ConsoleAdapter {
    pub fn new(config: &ConsoleConfig) -> Self {
        let actor = to_member(&config.actor);

        let mut members: HashMap<String, Member> = config
            .members
            .iter()
            .map(|u| (u.id.clone(), to_member(u)))
            .collect();
        members.insert(actor.id().to_string(), actor.clone());

        let mut users: HashMap<String, User> = config
            .users
            .iter()
            .map(|u| (u.id.clone(), to_user(u)))
            .collect();
        for member in members.values() {
            users.insert(member.id().to_string(), member.user.clone());
        }

        Self {
            bot: to_user(&config.bot),
            guild: Guild::new(&config.guild_id, &config.guild_name),
            channel_id: config.channel_id.clone(),
            actor,
            members: RwLock::new(members),
            users,
            bans: RwLock::new(Vec::new()),
        }
    }

    fn lookup<'a, T>(map: &'a HashMap<String, T>, key: &str, name: impl Fn(&T) -> &str) -> Option<&'a T> {
        map.get(key)
            .or_else(|| map.values().find(|v| name(v).eq_ignore_ascii_case(key)))
    }

    /// Build an inbound message as if the actor had typed `text`
    pub fn message_from_line(&self, text: &str) -> Message {
        let mut message = Message::new(
            self.guild.clone(),
            self.channel_id.clone(),
            self.actor.user.clone(),
            text,
        )
        .with_member(self.actor.clone());

        let members = self.members.read().ok();
        for id in mention_ids(text) {
            let member = members.as_ref().and_then(|m| m.get(&id).cloned());
            message = match (member, self.users.get(&id)) {
                (Some(member), _) => message.with_mentioned_member(member),
                (None, Some(user)) => message.with_mentioned_user(user.clone()),
                (None, None) => message,
            };
        }
        message
    }

    pub fn bans(&self) -> Vec<BanRecord> {
        self.bans.read().map(|b| b.clone()).unwrap_or_default()
    }

    fn record_ban(&self, guild_id: &str, user_id: &str, reason: &str) -> Result<(), PlatformError> {
        if guild_id != self.guild.id {
            return Err(PlatformError::NotFound(format!("guild {}", guild_id)));
        }
        if let Ok(mut members) = self.members.write() {
            members.remove(user_id);
        }
        let mut bans = self
            .bans
            .write()
            .map_err(|_| PlatformError::Network("ban list unavailable".to_string()))?;
        bans.push(BanRecord {
            guild_id: guild_id.to_string(),
            user_id: user_id.to_string(),
            reason: reason.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl Platform for ConsoleAdapter {
    fn bot_user(&self) -> User {
        self.bot.clone()
    }

    async fn reply(&self, _channel_id: &str, reply: Reply) -> Result<(), PlatformError> {
        println!("[BOT] {}", reply.render());
        Ok(())
    }

    async fn send_direct(&self, user_id: &str, reply: Reply) -> Result<(), PlatformError> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| PlatformError::NotFound(format!("user {}", user_id)))?;
        if user.is_bot {
            return Err(PlatformError::DirectMessagesClosed);
        }
        println!("[DM -> {}] {}", user.tag(), reply.render());
        Ok(())
    }

    async fn fetch_member(&self, guild_id: &str, user_id: &str) -> Result<Member, PlatformError> {
        if guild_id != self.guild.id {
            return Err(PlatformError::NotFound(format!("guild {}", guild_id)));
        }
        let members = self
            .members
            .read()
            .map_err(|_| PlatformError::Network("member cache unavailable".to_string()))?;
        Self::lookup(&members, user_id, |m| m.user.username.as_str())
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("member {}", user_id)))
    }

    async fn fetch_user(&self, user_id: &str) -> Result<User, PlatformError> {
        Self::lookup(&self.users, user_id, |u| u.username.as_str())
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("user {}", user_id)))
    }

    async fn ban_member(&self, guild_id: &str, member: &User, reason: &str) -> Result<(), PlatformError> {
        self.record_ban(guild_id, &member.id, reason)
    }

    async fn ban_user(&self, guild_id: &str, user_id: &str, reason: &str) -> Result<(), PlatformError> {
        self.record_ban(guild_id, user_id, reason)
    }

    async fn set_activity(&self, status: &str) -> Result<(), PlatformError> {
        tracing::info!("Presence set to \"{}\"", status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_mentions_resolve_against_roster() {
        let adapter = ConsoleAdapter::new(&ConsoleConfig::default());
        let msg = adapter.message_from_line("!ban <@100000000000000002> <@123456789> <@5>");

        assert_eq!(msg.mentions.len(), 2);
        assert_eq!(msg.mentioned_members.len(), 1);
        assert_eq!(msg.mentioned_members[0].user.username, "shinji");
        assert!(msg.member.is_some());
    }

    #[tokio::test]
    async fn members_are_found_by_id_or_name() {
        let adapter = ConsoleAdapter::new(&ConsoleConfig::default());
        let guild = ConsoleConfig::default().guild_id;

        assert!(adapter.fetch_member(&guild, "100000000000000002").await.is_ok());
        assert!(adapter.fetch_member(&guild, "Shinji").await.is_ok());
        assert!(adapter.fetch_member(&guild, "123456789").await.is_err());
        assert!(adapter.fetch_user("123456789").await.is_ok());
    }

    #[tokio::test]
    async fn banning_a_member_removes_them() {
        let adapter = ConsoleAdapter::new(&ConsoleConfig::default());
        let guild = ConsoleConfig::default().guild_id;
        let shinji = adapter.fetch_member(&guild, "shinji").await.unwrap();

        adapter.ban_member(&guild, &shinji.user, "spamming").await.unwrap();

        assert!(adapter.fetch_member(&guild, "shinji").await.is_err());
        assert_eq!(adapter.bans()[0].reason, "spamming");
    }
}

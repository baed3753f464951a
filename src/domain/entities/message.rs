use super::{Member, User};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex_lite::Regex;

static MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<@!?(\d+)>").expect("mention pattern is valid"));

/// Extract the user id from a `<@id>` or `<@!id>` mention token
pub fn mention_id(token: &str) -> Option<&str> {
    let caps = MENTION.captures(token)?;
    let whole = caps.get(0)?;
    if whole.start() != 0 || whole.end() != token.len() {
        return None;
    }
    caps.get(1).map(|m| m.as_str())
}

/// All user ids mentioned in a piece of text, in order of appearance
pub fn mention_ids(text: &str) -> Vec<String> {
    MENTION
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// The guild a message was posted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: String,
    pub name: String,
}

impl Guild {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Represents an inbound guild message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub guild: Guild,
    pub channel_id: String,
    pub author: User,
    /// The author's membership, when the platform delivered it
    pub member: Option<Member>,
    pub content: String,
    /// Users mentioned directly in the message
    pub mentions: Vec<User>,
    /// Mentioned users that are members of the guild
    pub mentioned_members: Vec<Member>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(guild: Guild, channel_id: impl Into<String>, author: User, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            guild,
            channel_id: channel_id.into(),
            author,
            member: None,
            content: content.into(),
            mentions: Vec::new(),
            mentioned_members: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.member = Some(member);
        self
    }

    /// Record a mention of a guild member
    pub fn with_mentioned_member(mut self, member: Member) -> Self {
        self.mentions.push(member.user.clone());
        self.mentioned_members.push(member);
        self
    }

    /// Record a mention of a user who is not a member of the guild
    pub fn with_mentioned_user(mut self, user: User) -> Self {
        self.mentions.push(user);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mention_id_accepts_both_forms() {
        assert_eq!(mention_id("<@123>"), Some("123"));
        assert_eq!(mention_id("<@!456>"), Some("456"));
        assert_eq!(mention_id("123"), None);
        assert_eq!(mention_id("x<@123>"), None);
    }

    #[test]
    fn mention_ids_keeps_order() {
        let ids = mention_ids("!ban <@2> and <@!1> please");
        assert_eq!(ids, vec!["2".to_string(), "1".to_string()]);
    }
}

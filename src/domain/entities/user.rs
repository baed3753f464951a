use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a platform-wide user identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub discriminator: Option<String>,
    pub is_bot: bool,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            discriminator: None,
            is_bot: false,
        }
    }

    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = Some(discriminator.into());
        self
    }

    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    /// Display tag, `name#1234` on platforms that still use discriminators
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(d) if d != "0" => format!("{}#{}", self.username, d),
            _ => self.username.clone(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Guild-scoped permissions an actor may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    Administrator,
    BanMembers,
    KickMembers,
    ManageMessages,
    ManageGuild,
}

impl Permission {
    pub fn as_str(&self) -> &str {
        match self {
            Permission::Administrator => "administrator",
            Permission::BanMembers => "ban-members",
            Permission::KickMembers => "kick-members",
            Permission::ManageMessages => "manage-messages",
            Permission::ManageGuild => "manage-guild",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user as seen through their membership of one guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub user: User,
    pub permissions: Vec<Permission>,
    /// Whether the bot outranks this member and may act on them
    pub moderatable: bool,
}

impl Member {
    pub fn new(user: User) -> Self {
        Self {
            user,
            permissions: Vec::new(),
            moderatable: true,
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_moderatable(mut self, moderatable: bool) -> Self {
        self.moderatable = moderatable;
        self
    }

    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&Permission::Administrator)
            || self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_includes_discriminator_when_present() {
        let user = User::new("1", "rei").with_discriminator("0420");
        assert_eq!(user.tag(), "rei#0420");

        let migrated = User::new("2", "asuka").with_discriminator("0");
        assert_eq!(migrated.tag(), "asuka");
    }

    #[test]
    fn administrator_implies_every_permission() {
        let admin = Member::new(User::new("1", "misato"))
            .with_permissions(vec![Permission::Administrator]);
        assert!(admin.has_permission(Permission::BanMembers));

        let mod_ = Member::new(User::new("2", "ritsuko"))
            .with_permissions(vec![Permission::KickMembers]);
        assert!(!mod_.has_permission(Permission::BanMembers));
    }
}

use super::{Member, User};

/// A target that is currently a member of the guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberTarget {
    pub identity: User,
    pub display_tag: String,
    pub moderation_eligible: bool,
    pub can_direct_message: bool,
}

impl From<Member> for MemberTarget {
    fn from(member: Member) -> Self {
        Self {
            display_tag: member.user.tag(),
            can_direct_message: !member.user.is_bot,
            moderation_eligible: member.moderatable,
            identity: member.user,
        }
    }
}

/// A platform-wide identity with no membership in the guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTarget {
    pub identity: User,
    pub display_tag: String,
}

impl From<User> for UserTarget {
    fn from(user: User) -> Self {
        Self {
            display_tag: user.tag(),
            identity: user,
        }
    }
}

/// Result of resolving a user reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    Member(MemberTarget),
    User(UserTarget),
}

impl ResolvedTarget {
    pub fn id(&self) -> &str {
        match self {
            ResolvedTarget::Member(m) => &m.identity.id,
            ResolvedTarget::User(u) => &u.identity.id,
        }
    }

    pub fn is_member(&self) -> bool {
        matches!(self, ResolvedTarget::Member(_))
    }
}

/// Uniform report produced by a moderation action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub success: bool,
    pub summary: String,
    pub notification_sent: bool,
}

impl ActionOutcome {
    pub fn success(summary: impl Into<String>, notification_sent: bool) -> Self {
        Self {
            success: true,
            summary: summary.into(),
            notification_sent,
        }
    }

    pub fn failure(summary: impl Into<String>, notification_sent: bool) -> Self {
        Self {
            success: false,
            summary: summary.into(),
            notification_sent,
        }
    }
}

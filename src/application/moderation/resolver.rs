//! Target resolution through an ordered fallback chain

use std::sync::Arc;

use tracing::debug;

use crate::application::messaging::InvocationContext;
use crate::domain::entities::message::mention_id;
use crate::domain::entities::{MemberTarget, ResolvedTarget, User};
use crate::domain::traits::Platform;

/// Reasons a resolved target is refused before any action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejection {
    /// The actor targeted themselves
    SelfTarget,
    /// The bot does not outrank the member
    NotModeratable,
}

/// Resolves a user reference into a member or a bare user.
///
/// Order, first success wins:
/// 1. the first mentioned member of the message
/// 2. a live guild membership fetch for the token
/// 3. a platform-wide user fetch for the token
pub struct TargetResolver {
    platform: Arc<dyn Platform>,
}

impl TargetResolver {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    pub async fn resolve(&self, ctx: &InvocationContext, raw_token: &str) -> Option<ResolvedTarget> {
        if let Some(member) = ctx.message.mentioned_members.first() {
            return Some(ResolvedTarget::Member(MemberTarget::from(member.clone())));
        }

        let id = normalize_token(raw_token);
        if id.is_empty() {
            return None;
        }

        match self.platform.fetch_member(&ctx.guild().id, id).await {
            Ok(member) => return Some(ResolvedTarget::Member(member.into())),
            Err(e) => debug!(token = id, error = %e, "member fetch failed, trying user"),
        }

        match self.platform.fetch_user(id).await {
            Ok(user) => Some(ResolvedTarget::User(user.into())),
            Err(e) => {
                debug!(token = id, error = %e, "user fetch failed");
                None
            }
        }
    }
}

/// Accept `<@id>`, `<@!id>`, `@handle` and bare ids alike
fn normalize_token(raw: &str) -> &str {
    let raw = raw.trim();
    mention_id(raw).unwrap_or_else(|| raw.trim_start_matches('@'))
}

/// Guards applied after resolution and before any action
pub fn check_guards(actor: &User, target: &ResolvedTarget) -> Result<(), GuardRejection> {
    if target.id() == actor.id {
        return Err(GuardRejection::SelfTarget);
    }

    match target {
        ResolvedTarget::Member(member) if !member.moderation_eligible => {
            Err(GuardRejection::NotModeratable)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Member;

    #[test]
    fn normalize_strips_mention_syntax() {
        assert_eq!(normalize_token("<@!42>"), "42");
        assert_eq!(normalize_token("@shinji"), "shinji");
        assert_eq!(normalize_token(" 42 "), "42");
    }

    #[test]
    fn self_target_is_rejected_for_both_variants() {
        let actor = User::new("7", "gendo");
        let as_member = ResolvedTarget::Member(Member::new(actor.clone()).into());
        let as_user = ResolvedTarget::User(actor.clone().into());

        assert_eq!(check_guards(&actor, &as_member), Err(GuardRejection::SelfTarget));
        assert_eq!(check_guards(&actor, &as_user), Err(GuardRejection::SelfTarget));
    }

    #[test]
    fn eligibility_only_applies_to_members() {
        let actor = User::new("1", "misato");
        let target = User::new("2", "kaworu");

        let outranked = ResolvedTarget::Member(
            Member::new(target.clone()).with_moderatable(false).into(),
        );
        assert_eq!(check_guards(&actor, &outranked), Err(GuardRejection::NotModeratable));

        let bare = ResolvedTarget::User(target.into());
        assert_eq!(check_guards(&actor, &bare), Ok(()));
    }
}

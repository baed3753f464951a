//! Ban action - notifies, bans, and reports a uniform outcome

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::resolver::{check_guards, GuardRejection, TargetResolver};
use crate::application::messaging::CommandContext;
use crate::domain::entities::reply::{COLOR_ERROR, COLOR_SUCCESS};
use crate::domain::entities::{
    ActionOutcome, Embed, Guild, MemberTarget, Reply, ResolvedTarget, UserTarget,
};
use crate::domain::traits::Platform;

/// Reason recorded when the invoker gives none
pub const DEFAULT_REASON: &str = "No reason provided";

const FAILURE_NOTICE: &str = "An error occurred while trying to ban the user.";

/// Join everything after the target token into the reason text
pub fn reason_from_args(args: &[String]) -> String {
    let reason = args.get(1..).unwrap_or_default().join(" ");
    if reason.trim().is_empty() {
        DEFAULT_REASON.to_string()
    } else {
        reason
    }
}

/// Performs the irreversible ban, branching on the kind of target
pub struct BanAction {
    platform: Arc<dyn Platform>,
}

impl BanAction {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self { platform }
    }

    pub async fn execute(&self, guild: &Guild, target: &ResolvedTarget, reason: &str) -> ActionOutcome {
        match target {
            ResolvedTarget::Member(member) => self.ban_member(guild, member, reason).await,
            ResolvedTarget::User(user) => self.ban_user(guild, user, reason).await,
        }
    }

    async fn ban_member(&self, guild: &Guild, target: &MemberTarget, reason: &str) -> ActionOutcome {
        let notified = self.notify(guild, target, reason).await;

        let result = self
            .platform
            .ban_member(&guild.id, &target.identity, reason)
            .await;

        match result {
            Ok(()) => {
                info!(guild = %guild.id, target = %target.identity.id, notified, "member banned");
                ActionOutcome::success(banned_summary(&target.display_tag, reason), notified)
            }
            Err(e) => {
                error!(guild = %guild.id, target = %target.identity.id, error = ?e, "member ban failed");
                ActionOutcome::failure(FAILURE_NOTICE, notified)
            }
        }
    }

    async fn ban_user(&self, guild: &Guild, target: &UserTarget, reason: &str) -> ActionOutcome {
        let result = self
            .platform
            .ban_user(&guild.id, &target.identity.id, reason)
            .await;

        match result {
            Ok(()) => {
                info!(guild = %guild.id, target = %target.identity.id, "user banned by id");
                ActionOutcome::success(banned_summary(&target.display_tag, reason), false)
            }
            Err(e) => {
                error!(guild = %guild.id, target = %target.identity.id, error = ?e, "user ban failed");
                ActionOutcome::failure(FAILURE_NOTICE, false)
            }
        }
    }

    /// Best-effort notice sent before the ban; failure is logged and ignored
    async fn notify(&self, guild: &Guild, target: &MemberTarget, reason: &str) -> bool {
        if !target.can_direct_message {
            debug!(target = %target.identity.id, "target cannot receive direct messages");
            return false;
        }

        let notice = Reply::embed(Embed::new(
            format!("You were banned from {}", guild.name),
            format!("**Reason:** {}", reason),
            COLOR_ERROR,
        ));

        match self.platform.send_direct(&target.identity.id, notice).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Could not send a DM to {}", target.display_tag);
                false
            }
        }
    }
}

fn banned_summary(tag: &str, reason: &str) -> String {
    format!("{} was banned for: {}", tag, reason)
}

/// Where a ban invocation ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BanReport {
    MissingTarget,
    NotFound,
    Declined(GuardRejection),
    Finished {
        target: ResolvedTarget,
        reason: String,
        outcome: ActionOutcome,
    },
}

impl BanReport {
    /// Resolve, guard and ban for one invocation
    pub async fn run(ctx: &CommandContext, args: &[String]) -> Self {
        let Some(token) = args.first() else {
            return BanReport::MissingTarget;
        };

        let resolver = TargetResolver::new(Arc::clone(&ctx.platform));
        let Some(target) = resolver.resolve(&ctx.invocation, token).await else {
            return BanReport::NotFound;
        };

        if let Err(rejection) = check_guards(ctx.invocation.actor(), &target) {
            return BanReport::Declined(rejection);
        }

        let reason = reason_from_args(args);
        let outcome = BanAction::new(Arc::clone(&ctx.platform))
            .execute(ctx.invocation.guild(), &target, &reason)
            .await;

        BanReport::Finished {
            target,
            reason,
            outcome,
        }
    }

    /// User-facing reply for the invoker
    pub fn to_reply(&self) -> Reply {
        match self {
            BanReport::MissingTarget => {
                Reply::error("Please provide a valid user tag or ID to ban.")
            }
            BanReport::NotFound => Reply::error("Could not find that user."),
            BanReport::Declined(GuardRejection::SelfTarget) => Reply::text("Nice try."),
            BanReport::Declined(GuardRejection::NotModeratable) => Reply::error(
                "I cannot ban this user. They may have higher permissions than me.",
            ),
            BanReport::Finished { outcome, .. } if outcome.success => Reply::embed(
                Embed::new("Done👍", outcome.summary.clone(), COLOR_SUCCESS).with_timestamp(),
            ),
            BanReport::Finished { outcome, .. } => Reply::error(outcome.summary.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reason_joins_trailing_arguments() {
        assert_eq!(reason_from_args(&args(&["<@1>", "spamming", "links"])), "spamming links");
    }

    #[test]
    fn reason_defaults_when_absent() {
        assert_eq!(reason_from_args(&args(&["<@1>"])), DEFAULT_REASON);
        assert_eq!(reason_from_args(&[]), DEFAULT_REASON);
    }

    #[test]
    fn replies_match_each_terminal_state() {
        assert_eq!(BanReport::Declined(GuardRejection::SelfTarget).to_reply().render(), "Nice try.");

        let failed = BanReport::Finished {
            target: ResolvedTarget::User(crate::domain::entities::User::new("1", "x").into()),
            reason: "abuse".into(),
            outcome: ActionOutcome::failure(FAILURE_NOTICE, false),
        };
        let reply = failed.to_reply();
        assert_eq!(reply.embed.map(|e| e.description), Some(FAILURE_NOTICE.to_string()));
    }
}

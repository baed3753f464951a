//! Domain entities - Core business objects

pub mod command;
pub mod event;
pub mod message;
pub mod reply;
pub mod target;
pub mod user;

pub use command::{Command, CommandRegistry, MODERATION_CATEGORY};
pub use event::PlatformEvent;
pub use message::{Guild, Message};
pub use reply::{Embed, Reply};
pub use target::{ActionOutcome, MemberTarget, ResolvedTarget, UserTarget};
pub use user::{Member, Permission, User};

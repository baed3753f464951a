//! Moderation - Target resolution and the actions built on it

pub mod ban;
pub mod resolver;

pub use ban::{BanAction, BanReport, DEFAULT_REASON};
pub use resolver::{check_guards, GuardRejection, TargetResolver};

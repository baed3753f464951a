//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Errors: Domain-specific errors
//! - Messaging: Prefix resolution, parsing, dispatching
//! - Moderation: Target resolution and the ban action
//! - Permissions: The default permission gate
//! - Events: Named-signal subscriptions

pub mod errors;
pub mod events;
pub mod messaging;
pub mod moderation;
pub mod permissions;

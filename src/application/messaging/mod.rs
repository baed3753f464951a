//! Message handling - Prefix resolution, parsing and dispatch

pub mod context;
pub mod dispatcher;
pub mod inbound;
pub mod parser;
pub mod prefix;

pub use context::{CommandContext, InvocationContext};
pub use dispatcher::{DispatchOutcome, IgnoreReason, MessageDispatcher};
pub use inbound::spawn_inbound;
pub use parser::ParsedCommand;
pub use prefix::PrefixResolver;

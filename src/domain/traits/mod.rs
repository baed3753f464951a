//! Domain traits - Abstractions for infrastructure implementations

pub mod collaborators;
pub mod handler;
pub mod platform;
pub mod store;

pub use collaborators::{AuditSink, ErrorSink, PermissionGate};
pub use handler::{CommandHandler, EventHandler};
pub use platform::Platform;
pub use store::PrefixStore;

//! Plugin system for rei-bot
//!
//! Commands and event subscriptions are declared as YAML manifests in a
//! directory tree and bound at startup to handlers compiled into the bot.

pub mod loader;
pub mod manifest;

pub use loader::{LoadReport, PluginLoader};
pub use manifest::{CommandManifest, EventManifest};

//! Built-in handlers that plugin manifests bind to by key

pub mod ban;
pub mod help;
pub mod lifecycle;
pub mod ping;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::traits::{CommandHandler, EventHandler};

pub use ban::BanCommand;
pub use help::HelpCommand;
pub use lifecycle::{ErrorLogger, MessageTrace, PresenceRotator, ReadyLogger};
pub use ping::PingCommand;

/// Handler keys a manifest may reference, matched case-insensitively
#[derive(Default, Clone)]
pub struct HandlerCatalog {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    events: HashMap<String, Arc<dyn EventHandler>>,
}

impl HandlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogue of everything compiled into the bot
    pub fn builtin(statuses: Vec<String>, presence_interval: Duration) -> Self {
        Self::new()
            .with_command("ban", Arc::new(BanCommand))
            .with_command("help", Arc::new(HelpCommand))
            .with_command("ping", Arc::new(PingCommand))
            .with_event("ready-log", Arc::new(ReadyLogger))
            .with_event("presence", Arc::new(PresenceRotator::new(statuses, presence_interval)))
            .with_event("error-log", Arc::new(ErrorLogger))
            .with_event("message-trace", Arc::new(MessageTrace))
    }

    pub fn with_command(mut self, key: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        self.commands.insert(key.into().to_lowercase(), handler);
        self
    }

    pub fn with_event(mut self, key: impl Into<String>, handler: Arc<dyn EventHandler>) -> Self {
        self.events.insert(key.into().to_lowercase(), handler);
        self
    }

    pub fn command(&self, key: &str) -> Option<Arc<dyn CommandHandler>> {
        self.commands.get(&key.to_lowercase()).cloned()
    }

    pub fn event(&self, key: &str) -> Option<Arc<dyn EventHandler>> {
        self.events.get(&key.to_lowercase()).cloned()
    }
}

use super::{Message, User};

pub const SIGNAL_READY: &str = "ready";
pub const SIGNAL_MESSAGE_CREATE: &str = "messageCreate";
pub const SIGNAL_ERROR: &str = "error";

/// Events delivered by the platform client to subscribed handlers
#[derive(Debug, Clone)]
pub enum PlatformEvent {
    Ready { user: User },
    MessageCreate(Box<Message>),
    Error { message: String },
    Custom { name: String, data: serde_json::Value },
}

impl PlatformEvent {
    /// Signal name the event is delivered under
    pub fn signal(&self) -> &str {
        match self {
            PlatformEvent::Ready { .. } => SIGNAL_READY,
            PlatformEvent::MessageCreate(_) => SIGNAL_MESSAGE_CREATE,
            PlatformEvent::Error { .. } => SIGNAL_ERROR,
            PlatformEvent::Custom { name, .. } => name,
        }
    }
}

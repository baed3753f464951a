//! Per-message task spawning

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use super::dispatcher::MessageDispatcher;
use crate::application::events::EventBus;
use crate::domain::entities::{Message, PlatformEvent};
use crate::domain::traits::Platform;

/// Spawn the `messageCreate` listeners and the command dispatch for one
/// inbound message as separate tasks.
///
/// A slow or panicking listener cannot hold up or abort the command.
pub fn spawn_inbound(
    tasks: &mut JoinSet<()>,
    bus: &Arc<EventBus>,
    dispatcher: &Arc<MessageDispatcher>,
    platform: &Arc<dyn Platform>,
    message: Message,
) {
    let event = PlatformEvent::MessageCreate(Box::new(message.clone()));
    let bus = Arc::clone(bus);
    let platform = Arc::clone(platform);
    tasks.spawn(async move {
        bus.emit(&platform, &event).await;
    });

    let dispatcher = Arc::clone(dispatcher);
    tasks.spawn(async move {
        let outcome = dispatcher.dispatch(message).await;
        debug!(?outcome, "dispatch finished");
    });
}

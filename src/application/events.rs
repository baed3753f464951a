//! Named-signal subscriptions for platform events

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::domain::entities::PlatformEvent;
use crate::domain::traits::{EventHandler, Platform};

struct Subscription {
    name: String,
    handler: Arc<dyn EventHandler>,
    once: bool,
}

/// Routes platform events to the handlers subscribed to their signal.
///
/// Subscriptions are wired while plugins load; one-shot subscriptions are
/// dropped the first time their signal fires.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Mutex<HashMap<String, Vec<Subscription>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Subscription>>> {
        match self.subscriptions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn subscribe(&self, signal: &str, name: &str, handler: Arc<dyn EventHandler>, once: bool) {
        self.lock()
            .entry(signal.to_string())
            .or_default()
            .push(Subscription {
                name: name.to_string(),
                handler,
                once,
            });
    }

    /// Subscribe for every occurrence of `signal`
    pub fn on(&self, signal: &str, name: &str, handler: Arc<dyn EventHandler>) {
        self.subscribe(signal, name, handler, false);
    }

    /// Subscribe for the next occurrence of `signal` only
    pub fn once(&self, signal: &str, name: &str, handler: Arc<dyn EventHandler>) {
        self.subscribe(signal, name, handler, true);
    }

    /// Number of live subscriptions for a signal
    pub fn listener_count(&self, signal: &str) -> usize {
        self.lock().get(signal).map(Vec::len).unwrap_or(0)
    }

    /// Deliver an event to its subscribers in subscription order.
    ///
    /// Handler failures are logged and do not stop later handlers.
    /// Returns how many handlers ran.
    pub async fn emit(&self, platform: &Arc<dyn Platform>, event: &PlatformEvent) -> usize {
        let signal = event.signal();

        let due: Vec<(String, Arc<dyn EventHandler>)> = {
            let mut subscriptions = self.lock();
            let Some(list) = subscriptions.get_mut(signal) else {
                return 0;
            };
            let due = list
                .iter()
                .map(|s| (s.name.clone(), Arc::clone(&s.handler)))
                .collect();
            list.retain(|s| !s.once);
            due
        };

        for (name, handler) in &due {
            debug!(signal, handler = %name, "delivering event");
            if let Err(e) = handler.handle(platform, event).await {
                warn!(signal, handler = %name, error = %e, "event handler failed");
            }
        }

        due.len()
    }
}

//! Event handlers for client lifecycle signals

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::application::errors::BotError;
use crate::domain::entities::PlatformEvent;
use crate::domain::traits::{EventHandler, Platform};

/// Logs the identity the client logged in as
pub struct ReadyLogger;

#[async_trait]
impl EventHandler for ReadyLogger {
    async fn handle(&self, _platform: &Arc<dyn Platform>, event: &PlatformEvent) -> Result<(), BotError> {
        if let PlatformEvent::Ready { user } = event {
            info!("Logged in as {}", user.username);
        }
        Ok(())
    }
}

/// Logs client-level errors
pub struct ErrorLogger;

#[async_trait]
impl EventHandler for ErrorLogger {
    async fn handle(&self, _platform: &Arc<dyn Platform>, event: &PlatformEvent) -> Result<(), BotError> {
        if let PlatformEvent::Error { message } = event {
            error!(error = %message, "platform client error");
        }
        Ok(())
    }
}

/// Debug trace of every inbound message
pub struct MessageTrace;

#[async_trait]
impl EventHandler for MessageTrace {
    async fn handle(&self, _platform: &Arc<dyn Platform>, event: &PlatformEvent) -> Result<(), BotError> {
        if let PlatformEvent::MessageCreate(message) = event {
            let preview: String = message.content.chars().take(50).collect();
            debug!(guild = %message.guild.id, author = %message.author.id, "{}", preview);
        }
        Ok(())
    }
}

/// Sets a status line on ready, then cycles through the rest on an interval
pub struct PresenceRotator {
    statuses: Arc<Vec<String>>,
    interval: Duration,
    next: Arc<AtomicUsize>,
}

impl PresenceRotator {
    pub fn new(statuses: Vec<String>, interval: Duration) -> Self {
        Self {
            statuses: Arc::new(statuses),
            interval,
            next: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Status to show next, cycling through the list
    pub fn next_status(&self) -> Option<&str> {
        pick(&self.statuses, &self.next)
    }
}

fn pick<'a>(statuses: &'a [String], next: &AtomicUsize) -> Option<&'a str> {
    if statuses.is_empty() {
        return None;
    }
    let idx = next.fetch_add(1, Ordering::Relaxed) % statuses.len();
    Some(statuses[idx].as_str())
}

#[async_trait]
impl EventHandler for PresenceRotator {
    async fn handle(&self, platform: &Arc<dyn Platform>, event: &PlatformEvent) -> Result<(), BotError> {
        if !matches!(event, PlatformEvent::Ready { .. }) {
            return Ok(());
        }

        let Some(status) = self.next_status() else {
            return Ok(());
        };
        platform.set_activity(status).await?;

        if self.statuses.len() < 2 || self.interval.is_zero() {
            return Ok(());
        }

        let platform = Arc::clone(platform);
        let statuses = Arc::clone(&self.statuses);
        let next = Arc::clone(&self.next);
        let period = self.interval;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if let Some(status) = pick(&statuses, &next) {
                    if let Err(e) = platform.set_activity(status).await {
                        warn!(error = %e, "failed to update presence");
                    }
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_cycle_in_order() {
        let rotator = PresenceRotator::new(
            vec!["a".into(), "b".into()],
            Duration::from_secs(30),
        );
        assert_eq!(rotator.next_status(), Some("a"));
        assert_eq!(rotator.next_status(), Some("b"));
        assert_eq!(rotator.next_status(), Some("a"));
    }

    #[test]
    fn empty_status_list_yields_nothing() {
        let rotator = PresenceRotator::new(Vec::new(), Duration::from_secs(30));
        assert_eq!(rotator.next_status(), None);
    }
}

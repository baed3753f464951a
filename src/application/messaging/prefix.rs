//! Per-guild prefix resolution

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::traits::PrefixStore;

/// Resolves the active prefix for a guild, falling back to the default
#[derive(Clone)]
pub struct PrefixResolver {
    store: Arc<dyn PrefixStore>,
    default_prefix: String,
}

impl PrefixResolver {
    pub fn new(store: Arc<dyn PrefixStore>, default_prefix: impl Into<String>) -> Self {
        Self {
            store,
            default_prefix: default_prefix.into(),
        }
    }

    /// Never fails: misses and storage errors yield the default prefix
    pub async fn resolve(&self, guild_id: &str) -> String {
        match self.store.prefix(guild_id).await {
            Ok(Some(prefix)) if !prefix.is_empty() => prefix,
            Ok(_) => {
                debug!(guild_id, "no stored prefix, using default");
                self.default_prefix.clone()
            }
            Err(e) => {
                warn!(guild_id, error = %e, "prefix lookup failed, using default");
                self.default_prefix.clone()
            }
        }
    }
}

//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Database: Per-guild prefix storage
//! - Plugins: Manifest discovery and loading
//! - Sinks: Audit trail and error reporting
//! - Adapters: Platform integrations

pub mod adapters;
pub mod config;
pub mod database;
pub mod plugins;
pub mod sinks;

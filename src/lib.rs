//! rei-bot - message routing and moderation core for a guild chat bot

pub mod application;
pub mod domain;
pub mod handlers;
pub mod infrastructure;

//! Sinks for audit records and command failures

pub mod audit;
pub mod error;

pub use audit::{AuditRecord, JsonlAuditSink, LogAuditSink};
pub use error::ReplyingErrorSink;

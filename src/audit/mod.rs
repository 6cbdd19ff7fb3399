//! Audit logging for sheetfin
//!
//! Every dataset import is recorded in an append-only JSONL file next to the
//! store (`audit.log`), with the counts of what was loaded and replaced.

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;

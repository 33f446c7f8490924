//! Audit trail for Spendwise
//!
//! Every create, update and delete of a transaction, budget, category or
//! profile is appended to `audit.log` as one JSON line, tagged with the user
//! who made it. This is separate from the diagnostic `log` output: the audit
//! log is persistent and can be listed with `spendwise audit`.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

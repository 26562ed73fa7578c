//! Audit logging for splitledger
//!
//! Records every create, update, and delete of members, groups, expenses,
//! and settlements in an append-only line-delimited JSON log, with the
//! entity's JSON before and/or after the change.
//!
//! # Example
//!
//! ```rust,ignore
//! use splitledger::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Expense,
//!     expense.id.to_string(),
//!     Some(expense.description.clone()),
//!     &expense,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;

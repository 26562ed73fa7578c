//! Error type shared by every layer of splitledger

use thiserror::Error;

use crate::models::MemberId;

/// The main error type for splitledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// A record references a member outside the group being computed.
    ///
    /// Raised by the balance calculator; upstream validation should make
    /// this impossible, so it always points at inconsistent data.
    #[error("Integrity error: {record} references unknown member {member_id}")]
    Integrity { record: String, member_id: MemberId },

    /// Stored amounts pushed a member's balance outside the representable range
    #[error("Overflow error: {record} pushes the balance of {member_id} out of range")]
    Overflow { record: String, member_id: MemberId },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl LedgerError {
    fn not_found(entity_type: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.into(),
        }
    }

    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Member", identifier)
    }

    pub fn group_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Group", identifier)
    }

    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Expense", identifier)
    }

    pub fn settlement_not_found(identifier: impl Into<String>) -> Self {
        Self::not_found("Settlement", identifier)
    }

    /// Create an integrity error for a dangling member reference
    pub fn dangling_member(record: impl Into<String>, member_id: MemberId) -> Self {
        Self::Integrity {
            record: record.into(),
            member_id,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Create an overflow error for a balance that left `Decimal`'s range
    pub fn balance_overflow(record: impl Into<String>, member_id: MemberId) -> Self {
        Self::Overflow {
            record: record.into(),
            member_id,
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a data-integrity error
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity { .. })
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for splitledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

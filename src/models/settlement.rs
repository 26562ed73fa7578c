//! Settlement model
//!
//! A settlement records money that already changed hands outside the ledger,
//! e.g. Bob paying Alice back in cash. It reduces future suggested transfers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{GroupId, MemberId, SettlementId};
use super::money::Money;

/// A recorded direct payment between two group members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique identifier
    pub id: SettlementId,

    /// The group the payment settles debts in
    pub group_id: GroupId,

    /// Member who sent the money
    pub paid_by: MemberId,

    /// Member who received the money
    pub paid_to: MemberId,

    /// Amount transferred
    pub amount: Money,

    /// When the settlement was recorded
    pub created_at: DateTime<Utc>,
}

impl Settlement {
    /// Create a new settlement
    pub fn new(group_id: GroupId, paid_by: MemberId, paid_to: MemberId, amount: Money) -> Self {
        Self {
            id: SettlementId::new(),
            group_id,
            paid_by,
            paid_to,
            amount,
            created_at: Utc::now(),
        }
    }

    /// Validate the settlement
    pub fn validate(&self) -> Result<(), SettlementValidationError> {
        if !self.amount.is_positive() {
            return Err(SettlementValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(SettlementValidationError::AmountTooLarge(self.amount));
        }

        if self.paid_by == self.paid_to {
            return Err(SettlementValidationError::SelfPayment);
        }

        Ok(())
    }
}

/// Validation errors for settlements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    SelfPayment,
}

impl fmt::Display for SettlementValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Settlement amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Settlement amount {} exceeds the maximum of {}",
                amount,
                Money::max_amount()
            ),
            Self::SelfPayment => write!(f, "A member cannot settle with themselves"),
        }
    }
}

impl std::error::Error for SettlementValidationError {}

//! Expense model
//!
//! An expense is paid by one member and split across one or more members.
//! Splits are embedded in their expense, so deleting an expense removes its
//! splits with it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::ids::{ExpenseId, GroupId, MemberId};
use super::money::Money;
use crate::ledger::tolerance::{is_within_tolerance, TOLERANCE};

/// How an expense amount is divided between members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Everyone pays the same share
    #[default]
    Equal,
    /// Each member pays a percentage of the total
    Percentage,
    /// Explicit amounts per member
    Custom,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "equal"),
            Self::Percentage => write!(f, "percentage"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// One member's portion of an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// The member who owes this portion
    pub member_id: MemberId,

    /// The amount owed (zero or positive)
    pub amount: Money,
}

impl Split {
    /// Create a new split
    pub fn new(member_id: MemberId, amount: Money) -> Self {
        Self { member_id, amount }
    }

    /// Split an amount evenly between members
    ///
    /// Works in whole cents; cents left over by the division go one each to
    /// the first members in the given order.
    pub fn equal(
        amount: Money,
        members: &[MemberId],
    ) -> Result<Vec<Split>, ExpenseValidationError> {
        if members.is_empty() {
            return Err(ExpenseValidationError::NoSplits);
        }

        let total = total_cents(amount)?;
        let count = members.len() as i64;
        let shares = vec![total / count; members.len()];

        Ok(distribute(members, shares, total))
    }

    /// Split an amount by percentage per member
    ///
    /// Percentages must add up to 100 within tolerance. Each share is
    /// floored to the cent and the remainder is handed out to the first
    /// members in order, so the splits always sum to the amount exactly.
    pub fn by_percentage(
        amount: Money,
        percentages: &[(MemberId, Decimal)],
    ) -> Result<Vec<Split>, ExpenseValidationError> {
        if percentages.is_empty() {
            return Err(ExpenseValidationError::NoSplits);
        }

        let total_pct: Decimal = percentages.iter().map(|(_, pct)| *pct).sum();
        if let Some((_, pct)) = percentages.iter().find(|(_, pct)| *pct < Decimal::ZERO) {
            return Err(ExpenseValidationError::InvalidPercentage(*pct));
        }
        if (total_pct - Decimal::ONE_HUNDRED).abs() > TOLERANCE.as_decimal() {
            return Err(ExpenseValidationError::PercentagesDontSum(total_pct));
        }

        let total = total_cents(amount)?;
        let mut shares = Vec::with_capacity(percentages.len());
        for (_, pct) in percentages {
            let share = (Decimal::from(total) * *pct / Decimal::ONE_HUNDRED)
                .floor()
                .to_i64()
                .ok_or(ExpenseValidationError::InvalidPercentage(*pct))?;
            shares.push(share);
        }

        let members: Vec<MemberId> = percentages.iter().map(|(id, _)| *id).collect();
        Ok(distribute(&members, shares, total))
    }
}

fn total_cents(amount: Money) -> Result<i64, ExpenseValidationError> {
    if amount.exceeds_max() {
        return Err(ExpenseValidationError::AmountTooLarge(amount));
    }
    amount
        .cents()
        .ok_or(ExpenseValidationError::AmountTooLarge(amount))
}

/// Hand out the difference between `total` and the share sum one cent at a
/// time, starting from the first member.
fn distribute(members: &[MemberId], mut shares: Vec<i64>, total: i64) -> Vec<Split> {
    let mut leftover = total - shares.iter().sum::<i64>();
    let step = leftover.signum();
    let mut idx = 0;
    while leftover != 0 {
        let len = shares.len();
        shares[idx % len] += step;
        leftover -= step;
        idx += 1;
    }

    members
        .iter()
        .zip(shares)
        .map(|(id, cents)| Split::new(*id, Money::from_cents(cents)))
        .collect()
}

/// A shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The group this expense belongs to
    pub group_id: GroupId,

    /// What the money was spent on
    pub description: String,

    /// Total amount paid
    pub amount: Money,

    /// Member who paid
    pub paid_by: MemberId,

    /// Who owes what
    pub splits: Vec<Split>,

    /// Date of the expense
    pub date: NaiveDate,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense dated today
    pub fn new(
        group_id: GroupId,
        description: impl Into<String>,
        amount: Money,
        paid_by: MemberId,
        splits: Vec<Split>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            group_id,
            description: description.into(),
            amount,
            paid_by,
            splits,
            date: now.date_naive(),
            created_at: now,
        }
    }

    /// Sum of all split amounts
    pub fn split_total(&self) -> Money {
        self.splits.iter().map(|s| s.amount).sum()
    }

    /// Member ids referenced by the splits, in split order
    pub fn split_members(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.splits.iter().map(|s| s.member_id)
    }

    /// Validate the expense at creation time
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }

        if self.amount.exceeds_max() {
            return Err(ExpenseValidationError::AmountTooLarge(self.amount));
        }

        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.description.len() > 255 {
            return Err(ExpenseValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }

        if self.splits.is_empty() {
            return Err(ExpenseValidationError::NoSplits);
        }

        let mut seen = HashSet::new();
        for split in &self.splits {
            if split.amount.is_negative() {
                return Err(ExpenseValidationError::NegativeSplit(split.member_id));
            }
            if split.amount.exceeds_max() {
                return Err(ExpenseValidationError::AmountTooLarge(split.amount));
            }
            if !seen.insert(split.member_id) {
                return Err(ExpenseValidationError::DuplicateSplitMember(split.member_id));
            }
        }

        let split_total = self.split_total();
        if !is_within_tolerance(split_total - self.amount) {
            return Err(ExpenseValidationError::SplitMismatch {
                expected: self.amount,
                actual: split_total,
            });
        }

        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
    EmptyDescription,
    DescriptionTooLong(usize),
    NoSplits,
    NegativeSplit(MemberId),
    DuplicateSplitMember(MemberId),
    SplitMismatch { expected: Money, actual: Money },
    InvalidPercentage(Decimal),
    PercentagesDontSum(Decimal),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Expense amount must be positive, got {}", amount)
            }
            Self::AmountTooLarge(amount) => write!(
                f,
                "Amount {} exceeds the maximum of {}",
                amount,
                Money::max_amount()
            ),
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::DescriptionTooLong(len) => {
                write!(f, "Expense description too long ({} chars, max 255)", len)
            }
            Self::NoSplits => write!(f, "Expense must be split between at least one member"),
            Self::NegativeSplit(member) => {
                write!(f, "Split amount for {} cannot be negative", member)
            }
            Self::DuplicateSplitMember(member) => {
                write!(f, "Member {} appears in more than one split", member)
            }
            Self::SplitMismatch { expected, actual } => write!(
                f,
                "Split amounts must equal the total expense amount: expected {}, got {}",
                expected, actual
            ),
            Self::InvalidPercentage(pct) => write!(f, "Invalid percentage: {}", pct),
            Self::PercentagesDontSum(total) => {
                write!(f, "Percentages must add up to 100, got {}", total)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

//! Core data models for splitledger
//!
//! This module contains the data structures of the shared-expense domain:
//! members, groups, expenses with their splits, and settlements.

pub mod expense;
pub mod group;
pub mod ids;
pub mod member;
pub mod money;
pub mod settlement;

pub use expense::{Expense, ExpenseValidationError, Split, SplitMode};
pub use group::{Group, GroupValidationError};
pub use ids::{ExpenseId, GroupId, MemberId, SettlementId};
pub use member::{Member, MemberValidationError};
pub use money::{Money, MoneyParseError};
pub use settlement::{Settlement, SettlementValidationError};
